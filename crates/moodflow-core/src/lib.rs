//! Visualization and stream-aggregation engine for moodflow.
//!
//! Platform-free: the web front-end supplies surfaces, a scheduler and a
//! transport, and drives everything here one frame callback at a time.

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod feed;
pub mod frame;
pub mod mood;
pub mod particles;
pub mod random;
pub mod session;
pub mod surface;
pub mod transport;
pub mod waveform;

pub use color::{brightness, Color, Rgba};
pub use config::{BurstConfig, LookConfig, PhysicsConfig, RoomConfig, SessionConfig};
pub use error::{MoodError, Result};
pub use feed::{FeedEntry, MoodFeed};
pub use frame::{FrameOutcome, LoopControl, LoopState, VisualizationLoop};
pub use mood::{Mood, MoodEvent};
pub use particles::{Particle, ParticleSystem};
pub use random::{RandomSource, SequenceRandom};
pub use session::{BurstReport, Ingested, MoodSession, Outbound};
pub use surface::{Dimensions, Sprite, SpriteShape, Surface, VerticalGradient};
pub use transport::{displayed_occupancy, LoopbackTransport, MoodPublisher, RoomTransport};
pub use waveform::{QuadSegment, WaveShape, WaveformAggregator};
