use crate::color::Rgba;
use crate::constants::*;
use crate::error::{MoodError, Result};
use serde::{Deserialize, Serialize};

/// Top-level session configuration. Every field falls back to the
/// compiled-in constants when omitted from a JSON document.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub room: RoomConfig,
    pub burst: BurstConfig,
    pub physics: PhysicsConfig,
    pub waveform_capacity: usize,
    pub feed_capacity: usize,
    pub look: LookConfig,
    /// Display refresh rate the document was written for. `from_json`
    /// applies it once through [`SessionConfig::tuned_for_refresh_rate`].
    #[serde(skip_serializing)]
    pub refresh_hz: Option<f32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            room: RoomConfig::default(),
            burst: BurstConfig::default(),
            physics: PhysicsConfig::default(),
            waveform_capacity: WAVEFORM_CAPACITY,
            feed_capacity: FEED_CAPACITY,
            look: LookConfig::default(),
            refresh_hz: None,
        }
    }
}

impl SessionConfig {
    pub fn from_json(doc: &str) -> Result<Self> {
        let mut config: Self =
            serde_json::from_str(doc).map_err(|e| MoodError::InvalidConfig(e.to_string()))?;
        if let Some(hz) = config.refresh_hz.take() {
            if !(hz.is_finite() && hz > 0.0) {
                return Err(MoodError::InvalidConfig(format!(
                    "refresh_hz must be positive, got {hz}"
                )));
            }
            config = config.tuned_for_refresh_rate(hz);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let fail = |msg: &str| Err(MoodError::InvalidConfig(msg.to_string()));
        if self.waveform_capacity == 0 {
            return fail("waveform_capacity must be at least 1");
        }
        if self.feed_capacity == 0 {
            return fail("feed_capacity must be at least 1");
        }
        if self.burst.count == 0 {
            return fail("burst.count must be at least 1");
        }
        let b = &self.burst;
        if !finite_range(b.speed_min, b.speed_max) || b.speed_min < 0.0 {
            return fail("burst speed range must be finite, non-negative and non-empty");
        }
        if !finite_range(b.size_min, b.size_max) || b.size_min <= 0.0 {
            return fail("burst size range must be finite, positive and non-empty");
        }
        if !self.burst.spin_max.is_finite() || self.burst.spin_max < 0.0 {
            return fail("burst.spin_max must be finite and non-negative");
        }
        if !self.physics.gravity.is_finite() {
            return fail("physics.gravity must be finite");
        }
        if !(self.physics.life_decay > 0.0 && self.physics.life_decay.is_finite()) {
            return fail("physics.life_decay must be positive");
        }
        Ok(())
    }

    /// Rescale the per-tick constants for a display that ticks at `hz`
    /// instead of the 60 Hz they were tuned against. Velocities, spin and
    /// decay are per tick, gravity is per tick squared.
    pub fn tuned_for_refresh_rate(mut self, hz: f32) -> Self {
        if !(hz.is_finite() && hz > 0.0) {
            log::warn!("[config] ignoring refresh rate {hz}");
            return self;
        }
        let k = REFERENCE_REFRESH_HZ / hz;
        self.burst.speed_min *= k;
        self.burst.speed_max *= k;
        self.burst.spin_max *= k;
        self.physics.gravity *= k * k;
        self.physics.life_decay *= k;
        log::debug!("[config] tuned for {hz:.1} Hz (scale {k:.3})");
        self
    }
}

fn finite_range(lo: f32, hi: f32) -> bool {
    lo.is_finite() && hi.is_finite() && lo < hi
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub default_room: String,
    pub channel_prefix: String,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            default_room: DEFAULT_ROOM.to_string(),
            channel_prefix: CHANNEL_PREFIX.to_string(),
        }
    }
}

impl RoomConfig {
    pub fn channel_for(&self, room: &str) -> String {
        format!("{}{}", self.channel_prefix, room)
    }
}

/// Shape of one burst. Ranges are half-open: `[min, max)`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    pub count: usize,
    pub speed_min: f32,
    pub speed_max: f32,
    pub size_min: f32,
    pub size_max: f32,
    pub spin_max: f32,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            count: BURST_PARTICLE_COUNT,
            speed_min: BURST_SPEED_MIN,
            speed_max: BURST_SPEED_MAX,
            size_min: BURST_SIZE_MIN,
            size_max: BURST_SIZE_MAX,
            spin_max: BURST_SPIN_MAX,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub life_decay: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY_PER_TICK,
            life_decay: LIFE_DECAY_PER_TICK,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    pub particle_veil: Rgba,
    pub wave_veil: Rgba,
    pub glow_blur: f32,
    pub wave_gradient_top: Rgba,
    pub wave_gradient_bottom: Rgba,
    pub wave_stroke: Rgba,
    pub wave_stroke_width: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        let [r, g, b] = WAVE_TINT;
        Self {
            particle_veil: Rgba::new(0, 0, 0, PARTICLE_FADE_ALPHA),
            wave_veil: Rgba::new(0, 0, 0, WAVE_FADE_ALPHA),
            glow_blur: GLOW_BLUR_PX,
            wave_gradient_top: Rgba::new(r, g, b, WAVE_GRADIENT_TOP_ALPHA),
            wave_gradient_bottom: Rgba::new(r, g, b, WAVE_GRADIENT_BOTTOM_ALPHA),
            wave_stroke: Rgba::new(r, g, b, WAVE_STROKE_ALPHA),
            wave_stroke_width: WAVE_STROKE_WIDTH,
        }
    }
}
