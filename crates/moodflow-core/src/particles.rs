//! Burst particles: spawning, per-tick integration and expiry.

use crate::color::Color;
use crate::config::{BurstConfig, PhysicsConfig};
use crate::constants::LIFE_EPSILON;
use crate::random::RandomSource;
use glam::Vec2;
use std::f32::consts::TAU;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2, // units/tick
    pub color: Color,
    pub glyph: Option<String>,
    pub life: f32, // (0, 1] while alive
    pub size: f32,
    pub rotation: f32,
    pub rotation_speed: f32, // rad/tick, visual only
}

impl Particle {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > LIFE_EPSILON
    }
}

/// Owns every live particle. Order carries no meaning.
#[derive(Clone, Debug)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    burst: BurstConfig,
    physics: PhysicsConfig,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new(BurstConfig::default(), PhysicsConfig::default())
    }
}

impl ParticleSystem {
    pub fn new(burst: BurstConfig, physics: PhysicsConfig) -> Self {
        Self {
            particles: Vec::new(),
            burst,
            physics,
        }
    }

    /// Spawn one burst of the configured count at `origin`.
    pub fn spawn(
        &mut self,
        origin: Vec2,
        color: Color,
        glyph: Option<&str>,
        rng: &mut impl RandomSource,
    ) {
        self.spawn_n(origin, color, glyph, self.burst.count, rng);
    }

    /// Spawn `count` particles whose headings split the full circle into
    /// `count` equal sectors; per-particle speed, size and spin are drawn
    /// from the configured ranges.
    pub fn spawn_n(
        &mut self,
        origin: Vec2,
        color: Color,
        glyph: Option<&str>,
        count: usize,
        rng: &mut impl RandomSource,
    ) {
        let b = &self.burst;
        let glyph = glyph.filter(|g| !g.is_empty()).map(str::to_string);
        self.particles.reserve(count);
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32;
            let speed = rng.range(b.speed_min, b.speed_max);
            self.particles.push(Particle {
                position: origin,
                velocity: Vec2::from_angle(angle) * speed,
                color,
                glyph: glyph.clone(),
                life: 1.0,
                size: rng.range(b.size_min, b.size_max),
                rotation: rng.range(0.0, TAU),
                rotation_speed: rng.range(-b.spin_max, b.spin_max),
            });
        }
        log::debug!(
            "[particles] burst of {count} at ({:.0},{:.0}) {color}; live={}",
            origin.x,
            origin.y,
            self.particles.len()
        );
    }

    /// Advance every particle one tick, then drop the expired ones.
    pub fn tick(&mut self) {
        let gravity = self.physics.gravity;
        let decay = self.physics.life_decay;
        for p in &mut self.particles {
            p.position += p.velocity;
            p.velocity.y += gravity;
            p.life -= decay;
            p.rotation += p.rotation_speed;
        }
        self.particles.retain(Particle::is_alive);
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
