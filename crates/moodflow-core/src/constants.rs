// Shared tuning constants. Per-tick values are calibrated for one tick per
// display refresh at 60 Hz; see `SessionConfig::tuned_for_refresh_rate`.

// Burst shape
pub const BURST_PARTICLE_COUNT: usize = 15;
pub const BURST_SPEED_MIN: f32 = 2.0; // units/tick
pub const BURST_SPEED_MAX: f32 = 5.0; // exclusive
pub const BURST_SIZE_MIN: f32 = 10.0; // glyph font px or circle diameter
pub const BURST_SIZE_MAX: f32 = 30.0; // exclusive
pub const BURST_SPIN_MAX: f32 = 0.1; // rad/tick, spin drawn from [-max, max)

// Physics
pub const GRAVITY_PER_TICK: f32 = 0.1; // added to vy every tick
pub const LIFE_DECAY_PER_TICK: f32 = 0.01;
pub const LIFE_EPSILON: f32 = 1e-4; // f32 drift after 1/decay ticks stays below this
pub const REFERENCE_REFRESH_HZ: f32 = 60.0;

// Waveform
pub const WAVEFORM_CAPACITY: usize = 100;
pub const WAVE_BAND_SPAN: f32 = 0.8; // fraction of height used by values
pub const WAVE_BAND_FLOOR: f32 = 0.1; // fraction of height left below 0.0

// Feed
pub const FEED_CAPACITY: usize = 20;

// Rooms
pub const DEFAULT_ROOM: &str = "cosmic";
pub const CHANNEL_PREFIX: &str = "moodflow_";

// Click-to-burst
pub const CLICK_GLYPH: &str = "✨";
pub const CLICK_PALETTE: [&str; 5] = ["#FFD700", "#FF69B4", "#FF4500", "#9370DB", "#87CEEB"];

// Echo suppression memory (own optimistic bursts awaiting their echo)
pub const PENDING_ECHO_CAPACITY: usize = 32;

// Session identity
pub const SESSION_ID_PREFIX: &str = "user_";
pub const SESSION_ID_LEN: usize = 9;

// Look
pub const PARTICLE_FADE_ALPHA: f32 = 0.1; // black veil per frame, leaves trails
pub const WAVE_FADE_ALPHA: f32 = 0.2; // faster clear than the particle layer
pub const GLOW_BLUR_PX: f32 = 20.0;
pub const WAVE_TINT: [u8; 3] = [135, 206, 250]; // light sky blue
pub const WAVE_GRADIENT_TOP_ALPHA: f32 = 0.6;
pub const WAVE_GRADIENT_BOTTOM_ALPHA: f32 = 0.1;
pub const WAVE_STROKE_ALPHA: f32 = 0.8;
pub const WAVE_STROKE_WIDTH: f32 = 2.0;
