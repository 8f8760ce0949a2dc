// Host-side tests for burst spawning and particle physics.

mod common;

use common::approx;
use glam::Vec2;
use moodflow_core::{
    BurstConfig, Color, ParticleSystem, PhysicsConfig, SequenceRandom, Sprite, SpriteShape,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::TAU;

fn burst_at(origin: Vec2, glyph: Option<&str>, seed: u64) -> ParticleSystem {
    let mut sys = ParticleSystem::default();
    let mut rng = StdRng::seed_from_u64(seed);
    sys.spawn(origin, Color::new(255, 105, 180), glyph, &mut rng);
    sys
}

#[test]
fn spawn_creates_fifteen_particles_at_a_common_origin() {
    let origin = Vec2::new(120.0, 80.0);
    let sys = burst_at(origin, Some("★"), 7);
    assert_eq!(sys.count(), 15);
    for p in sys.particles() {
        assert_eq!(p.position, origin);
        assert_eq!(p.life, 1.0);
        assert_eq!(p.glyph.as_deref(), Some("★"));
    }
}

#[test]
fn spawn_headings_partition_the_circle_into_equal_sectors() {
    let sys = burst_at(Vec2::ZERO, None, 11);
    let sector = TAU / 15.0;
    for (i, p) in sys.particles().iter().enumerate() {
        let heading = p.velocity.y.atan2(p.velocity.x).rem_euclid(TAU);
        let expected = sector * i as f32;
        let diff = (heading - expected).abs();
        let diff = diff.min(TAU - diff);
        assert!(diff < 1e-4, "particle {i}: heading {heading} expected {expected}");
    }
}

#[test]
fn spawn_draws_speed_size_and_spin_from_their_ranges() {
    for seed in 0..20 {
        let sys = burst_at(Vec2::ZERO, None, seed);
        for p in sys.particles() {
            let speed = p.velocity.length();
            assert!((2.0 - 1e-4..5.0 + 1e-4).contains(&speed), "speed {speed}");
            assert!((10.0..30.0).contains(&p.size), "size {}", p.size);
            assert!((0.0..TAU).contains(&p.rotation), "rotation {}", p.rotation);
            assert!((-0.1..0.1).contains(&p.rotation_speed), "spin {}", p.rotation_speed);
        }
    }
}

#[test]
fn spawn_with_fixed_randomness_is_exact() {
    let mut sys = ParticleSystem::default();
    // every unit draw is 0.5: speed 3.5, size 20, rotation pi, spin 0
    let mut rng = SequenceRandom::constant(0.5);
    sys.spawn(Vec2::new(10.0, 10.0), Color::WHITE, None, &mut rng);
    for p in sys.particles() {
        assert!(approx(p.velocity.length(), 3.5, 1e-5));
        assert!(approx(p.size, 20.0, 1e-5));
        assert!(approx(p.rotation, TAU / 2.0, 1e-5));
        assert!(approx(p.rotation_speed, 0.0, 1e-6));
    }
    // first heading is angle 0: straight along +x
    let first = &sys.particles()[0];
    assert!(approx(first.velocity.x, 3.5, 1e-5) && approx(first.velocity.y, 0.0, 1e-5));
}

#[test]
fn spawn_n_honors_an_explicit_count() {
    let mut sys = ParticleSystem::default();
    let mut rng = StdRng::seed_from_u64(1);
    sys.spawn_n(Vec2::ZERO, Color::BLACK, Some(""), 4, &mut rng);
    assert_eq!(sys.count(), 4);
    // an empty glyph means "draw a circle"
    assert!(sys.particles().iter().all(|p| p.glyph.is_none()));
}

#[test]
fn tick_decays_life_by_a_fixed_step() {
    let mut sys = burst_at(Vec2::ZERO, None, 3);
    let mut prev: Vec<f32> = sys.particles().iter().map(|p| p.life).collect();
    for _ in 0..50 {
        sys.tick();
        for (p, before) in sys.particles().iter().zip(&prev) {
            assert!(p.life < *before);
            assert!(approx(*before - p.life, 0.01, 1e-5));
        }
        prev = sys.particles().iter().map(|p| p.life).collect();
    }
}

#[test]
fn hundred_ticks_expire_every_particle() {
    let mut sys = ParticleSystem::default();
    let mut rng = StdRng::seed_from_u64(5);
    for i in 0..6 {
        sys.spawn(Vec2::splat(i as f32 * 10.0), Color::WHITE, None, &mut rng);
    }
    assert_eq!(sys.count(), 90);
    for _ in 0..99 {
        sys.tick();
    }
    assert_eq!(sys.count(), 90, "still visible one tick before expiry");
    sys.tick();
    assert_eq!(sys.count(), 0);
    assert!(sys.is_empty());
}

#[test]
fn staggered_bursts_expire_independently() {
    let mut sys = ParticleSystem::default();
    let mut rng = StdRng::seed_from_u64(9);
    sys.spawn(Vec2::ZERO, Color::WHITE, None, &mut rng);
    for _ in 0..40 {
        sys.tick();
    }
    sys.spawn(Vec2::ZERO, Color::BLACK, None, &mut rng);
    assert_eq!(sys.count(), 30);
    for _ in 0..60 {
        sys.tick();
    }
    // the first burst is gone, the second has 40 ticks left
    assert_eq!(sys.count(), 15);
    assert!(sys.particles().iter().all(|p| p.color == Color::BLACK));
    assert!(sys.particles().iter().all(|p| p.life > 0.0 && p.life <= 1.0));
}

#[test]
fn gravity_accumulates_on_vertical_velocity_only() {
    let mut sys = burst_at(Vec2::new(50.0, 50.0), None, 21);
    let initial: Vec<Vec2> = sys.particles().iter().map(|p| p.velocity).collect();
    let ticks = 30;
    for _ in 0..ticks {
        sys.tick();
    }
    for (p, v0) in sys.particles().iter().zip(&initial) {
        assert!(approx(p.velocity.x, v0.x, 1e-6));
        assert!(
            approx(p.velocity.y, v0.y + 0.1 * ticks as f32, 1e-4),
            "vy {} expected {}",
            p.velocity.y,
            v0.y + 0.1 * ticks as f32
        );
    }
}

#[test]
fn position_integrates_velocity_before_gravity() {
    let mut sys = ParticleSystem::new(BurstConfig::default(), PhysicsConfig::default());
    let mut rng = SequenceRandom::constant(0.0);
    sys.spawn_n(Vec2::ZERO, Color::WHITE, None, 1, &mut rng);
    // heading 0, speed 2
    sys.tick();
    let p = &sys.particles()[0];
    assert!(approx(p.position.x, 2.0, 1e-6) && approx(p.position.y, 0.0, 1e-6));
    sys.tick();
    let p = &sys.particles()[0];
    assert!(approx(p.position.y, 0.1, 1e-6), "second step falls by the first tick's gravity");
}

#[test]
fn rotation_advances_by_spin() {
    let mut sys = ParticleSystem::default();
    let mut rng = SequenceRandom::new([0.5, 0.5, 0.25, 1.0]);
    sys.spawn_n(Vec2::ZERO, Color::WHITE, None, 1, &mut rng);
    let p0 = sys.particles()[0].clone();
    for _ in 0..10 {
        sys.tick();
    }
    let p = &sys.particles()[0];
    assert!(approx(p.rotation, p0.rotation + 10.0 * p0.rotation_speed, 1e-5));
}

#[test]
fn clear_drops_everything() {
    let mut sys = burst_at(Vec2::ZERO, None, 2);
    sys.clear();
    assert_eq!(sys.count(), 0);
}

#[test]
fn sprites_fade_with_life_and_glow_in_particle_color() {
    let color = Color::new(255, 69, 0);
    let mut sys = ParticleSystem::default();
    let mut rng = StdRng::seed_from_u64(4);
    sys.spawn(Vec2::new(5.0, 6.0), color, Some("🔥"), &mut rng);
    sys.spawn(Vec2::new(5.0, 6.0), color, None, &mut rng);
    for _ in 0..25 {
        sys.tick();
    }
    for p in sys.particles() {
        let s = Sprite::from_particle(p, 20.0);
        assert!(approx(s.alpha, 0.75, 1e-4));
        assert_eq!(s.glow, color);
        assert_eq!(s.glow_blur, 20.0);
        assert_eq!(s.position, p.position);
        assert_eq!(s.rotation, p.rotation);
        match (&s.shape, &p.glyph) {
            (SpriteShape::Glyph { text, font_px }, Some(g)) => {
                assert_eq!(text, g);
                assert_eq!(*font_px, p.size);
            }
            (SpriteShape::Disc { radius, fill }, None) => {
                assert_eq!(*radius, p.size / 2.0);
                assert_eq!(*fill, color);
            }
            other => panic!("shape does not match glyph: {other:?}"),
        }
    }
}
