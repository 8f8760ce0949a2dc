//! The session object: owns the particle set, the waveform, the feed and
//! the room state, and fans mood events out to them.

use crate::color::Color;
use crate::config::SessionConfig;
use crate::constants::{
    CLICK_GLYPH, CLICK_PALETTE, PENDING_ECHO_CAPACITY, SESSION_ID_LEN, SESSION_ID_PREFIX,
};
use crate::error::Result;
use crate::feed::{FeedEntry, MoodFeed};
use crate::mood::{Mood, MoodEvent};
use crate::particles::ParticleSystem;
use crate::random::RandomSource;
use crate::surface::Dimensions;
use crate::transport::{MoodPublisher, RoomTransport};
use crate::waveform::WaveformAggregator;
use glam::Vec2;
use rand::rngs::StdRng;
use std::collections::VecDeque;

/// A composed broadcast, not yet handed to the transport.
#[derive(Clone, Debug, PartialEq)]
pub struct Outbound {
    pub channel: String,
    pub event: MoodEvent,
}

/// What the local side did after a successful publish.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstReport {
    pub origin: Vec2,
    pub spawned: usize,
    pub sample: f32,
}

/// What ingesting one inbound event did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ingested {
    /// Burst origin, or `None` when the event echoed our own optimistic burst.
    pub burst: Option<Vec2>,
    pub sample: f32,
}

pub struct MoodSession<R: RandomSource = StdRng> {
    config: SessionConfig,
    session_id: String,
    room: String,
    particles: ParticleSystem,
    waveform: WaveformAggregator,
    feed: MoodFeed,
    particle_dims: Dimensions,
    wave_dims: Dimensions,
    // timestamps (as bits) of own publishes whose echo has not arrived yet
    pending_echoes: VecDeque<u64>,
    rng: R,
}

impl<R: RandomSource> MoodSession<R> {
    pub fn new(config: SessionConfig, mut rng: R) -> Result<Self> {
        config.validate()?;
        let session_id = generate_session_id(&mut rng);
        log::info!("[session] id={session_id} room={}", config.room.default_room);
        Ok(Self {
            room: config.room.default_room.clone(),
            particles: ParticleSystem::new(config.burst.clone(), config.physics.clone()),
            waveform: WaveformAggregator::new(config.waveform_capacity),
            feed: MoodFeed::new(config.feed_capacity),
            particle_dims: Dimensions::default(),
            wave_dims: Dimensions::default(),
            pending_echoes: VecDeque::with_capacity(PENDING_ECHO_CAPACITY),
            session_id,
            config,
            rng,
        })
    }

    pub fn id(&self) -> &str {
        &self.session_id
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn channel(&self) -> String {
        self.config.room.channel_for(&self.room)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut ParticleSystem {
        &mut self.particles
    }

    pub fn waveform(&self) -> &WaveformAggregator {
        &self.waveform
    }

    pub fn feed(&self) -> &MoodFeed {
        &self.feed
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        self.particles.count()
    }

    /// Latest particle surface size, used to place remote bursts.
    pub fn particle_dims(&self) -> Dimensions {
        self.particle_dims
    }

    pub fn wave_dims(&self) -> Dimensions {
        self.wave_dims
    }

    /// Record new surface sizes. Particle and waveform state is untouched.
    pub fn resize(&mut self, particle_dims: Dimensions, wave_dims: Dimensions) {
        self.particle_dims = particle_dims;
        self.wave_dims = wave_dims;
        log::debug!(
            "[session] resize particles={:.0}x{:.0} wave={:.0}x{:.0}",
            particle_dims.width,
            particle_dims.height,
            wave_dims.width,
            wave_dims.height
        );
    }

    /// Subscribe to the current room's channel.
    pub fn join(&mut self, transport: &mut impl RoomTransport) -> Result<()> {
        transport.subscribe(&self.channel())
    }

    /// Move to `room`: leave the old channel (when it differs), join the new
    /// one, and clear the particles and feed. The waveform carries over.
    ///
    /// The local switch always happens; a transport error is reported after.
    pub fn switch_room(&mut self, transport: &mut impl RoomTransport, room: &str) -> Result<()> {
        let old_channel = self.channel();
        let changed = self.room != room;
        self.room = room.to_string();
        self.particles.clear();
        self.feed.clear();
        self.pending_echoes.clear();
        log::debug!("[session] switched to room {room}");

        if changed {
            if let Err(e) = transport.unsubscribe(&old_channel) {
                log::warn!("[session] leaving {old_channel}: {e}");
            }
        }
        transport.subscribe(&self.channel())
    }

    /// Stamp `mood` into an event for the current room. Rejects bad colors
    /// before anything reaches the transport.
    pub fn compose(&self, mood: Mood, now_ms: f64) -> Result<Outbound> {
        Color::parse_hex(&mood.color)?;
        Ok(Outbound {
            channel: self.channel(),
            event: MoodEvent {
                label: mood.label,
                color: mood.color,
                glyph: mood.glyph,
                timestamp: now_ms,
                originator_id: self.session_id.clone(),
            },
        })
    }

    /// Mark `event` as ours before it is handed to the transport, so its
    /// echo spawns nothing even if it arrives before [`Self::confirm_published`].
    pub fn expect_echo(&mut self, event: &MoodEvent) {
        if self.pending_echoes.len() == PENDING_ECHO_CAPACITY {
            self.pending_echoes.pop_front();
        }
        self.pending_echoes.push_back(event.timestamp.to_bits());
    }

    /// Undo [`Self::expect_echo`] after a failed publish.
    pub fn cancel_echo(&mut self, event: &MoodEvent) {
        let bits = event.timestamp.to_bits();
        if let Some(i) = self.pending_echoes.iter().rposition(|t| *t == bits) {
            self.pending_echoes.remove(i);
        }
    }

    /// Local feedback once the transport accepted our event: a burst at a
    /// random origin, a feed entry and a waveform sample.
    ///
    /// Call [`Self::expect_echo`] before publishing; this does not register
    /// the echo itself.
    pub fn confirm_published(&mut self, event: &MoodEvent) -> Result<BurstReport> {
        let color = event.parsed_color()?;
        let origin = self.random_origin();
        let before = self.particles.count();
        self.particles.spawn(origin, color, event.glyph(), &mut self.rng);
        let sample = self.record(event, color);
        Ok(BurstReport {
            origin,
            spawned: self.particles.count() - before,
            sample,
        })
    }

    /// Compose, publish and apply local feedback in one step, for
    /// transports that answer synchronously.
    pub fn publish(
        &mut self,
        transport: &mut impl MoodPublisher,
        mood: Mood,
        now_ms: f64,
    ) -> Result<BurstReport> {
        let out = self.compose(mood, now_ms)?;
        self.expect_echo(&out.event);
        if let Err(e) = transport.publish(&out.channel, &out.event) {
            self.cancel_echo(&out.event);
            return Err(e);
        }
        self.confirm_published(&out.event)
    }

    /// Decode a wire message and ingest it.
    pub fn receive(&mut self, raw: &str) -> Result<Ingested> {
        let event = MoodEvent::from_json(raw).map_err(|e| {
            log::warn!("[session] dropping message: {e}");
            e
        })?;
        self.on_mood_event(&event)
    }

    /// Fan an inbound event out to the particles, feed and waveform.
    ///
    /// The echo of one of our own publishes spawns nothing, whether it lands
    /// before or after the local burst, but is still sampled and listed.
    pub fn on_mood_event(&mut self, event: &MoodEvent) -> Result<Ingested> {
        let color = event.parsed_color().map_err(|e| {
            log::warn!("[session] rejecting event from {}: {e}", event.originator_id);
            e
        })?;
        let burst = if self.take_pending_echo(event) {
            None
        } else {
            let origin = self.random_origin();
            self.particles.spawn(origin, color, event.glyph(), &mut self.rng);
            Some(origin)
        };
        let sample = self.record(event, color);
        Ok(Ingested { burst, sample })
    }

    /// Local-only burst at a pointer position, in a random palette color.
    pub fn click_burst(&mut self, origin: Vec2) -> Color {
        let pick = CLICK_PALETTE[self.rng.index(CLICK_PALETTE.len())];
        let color = Color::parse_hex(pick).unwrap_or(Color::WHITE);
        self.particles.spawn(origin, color, Some(CLICK_GLYPH), &mut self.rng);
        color
    }

    fn take_pending_echo(&mut self, event: &MoodEvent) -> bool {
        if event.originator_id != self.session_id {
            return false;
        }
        let bits = event.timestamp.to_bits();
        match self.pending_echoes.iter().position(|t| *t == bits) {
            Some(i) => {
                self.pending_echoes.remove(i);
                true
            }
            None => false,
        }
    }

    fn record(&mut self, event: &MoodEvent, color: Color) -> f32 {
        let sample = color.brightness();
        self.waveform.push(sample);
        self.feed.push(FeedEntry {
            glyph: event.glyph.clone(),
            label: event.label.clone(),
            color,
            timestamp: event.timestamp,
        });
        sample
    }

    fn random_origin(&mut self) -> Vec2 {
        let d = self.particle_dims;
        Vec2::new(self.rng.range(0.0, d.width), self.rng.range(0.0, d.height))
    }
}

fn generate_session_id(rng: &mut impl RandomSource) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let suffix: String = (0..SESSION_ID_LEN)
        .map(|_| ALPHABET[rng.index(ALPHABET.len())] as char)
        .collect();
    format!("{SESSION_ID_PREFIX}{suffix}")
}
