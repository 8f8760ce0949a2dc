// Host-side tests for the two render cycles and their start/stop switch.

mod common;

use common::{seeded_session, DrawCall, RecordingSurface};
use glam::Vec2;
use moodflow_core::{
    Color, FrameOutcome, LoopControl, LoopState, LookConfig, Mood, SessionConfig,
    VisualizationLoop,
};

#[test]
fn control_starts_idle_and_never_restarts_after_stop() {
    let control = LoopControl::new();
    assert_eq!(control.state(), LoopState::Idle);
    assert!(control.start());
    assert!(control.is_running());

    let shared = control.clone();
    shared.stop();
    assert_eq!(control.state(), LoopState::Stopped);
    assert!(!control.start(), "a torn-down loop stays down");
    assert!(!control.is_running());
}

#[test]
fn idle_loop_does_not_draw() {
    let viz = VisualizationLoop::default();
    let mut s = seeded_session(1);
    let mut surface = RecordingSurface::new(800.0, 600.0);
    let (outcome, _) = viz.particle_frame(&mut s, &mut surface);
    assert_eq!(outcome, FrameOutcome::Stop);
    assert!(surface.calls.is_empty());
}

#[test]
fn particle_frame_fades_then_draws_each_survivor() {
    let viz = VisualizationLoop::default();
    viz.start();
    let mut s = seeded_session(2);
    s.click_burst(Vec2::new(100.0, 100.0));
    let mut surface = RecordingSurface::new(800.0, 600.0);

    let (outcome, live) = viz.particle_frame(&mut s, &mut surface);

    assert_eq!(outcome, FrameOutcome::Continue);
    assert_eq!(live, 15);
    let veil = LookConfig::default().particle_veil;
    assert_eq!(surface.calls.first(), Some(&DrawCall::Fade(veil)));
    assert_eq!(surface.sprites().count(), 15);
    // one tick has run before drawing
    assert!(surface
        .sprites()
        .all(|sp| (sp.alpha - 0.99).abs() < 1e-5 && sp.position != Vec2::new(100.0, 100.0)));
}

#[test]
fn frames_stop_at_the_next_boundary_after_stop() {
    let viz = VisualizationLoop::default();
    viz.start();
    let mut s = seeded_session(3);
    let mut t = moodflow_core::LoopbackTransport::new();
    s.publish(&mut t, Mood::new("Happy", "#FFFFFF", "★"), 0.0).unwrap();
    let mut surface = RecordingSurface::new(800.0, 600.0);
    viz.particle_frame(&mut s, &mut surface);
    let before: Vec<f32> = s.particles().particles().iter().map(|p| p.life).collect();

    viz.control().clone().stop();
    surface.clear();
    let (outcome, live) = viz.particle_frame(&mut s, &mut surface);
    let waves = viz.waveform_frame(&s, &mut surface);

    assert_eq!(outcome, FrameOutcome::Stop);
    assert_eq!(waves, FrameOutcome::Stop);
    assert_eq!(live, 15);
    assert!(surface.calls.is_empty(), "no drawing after stop");
    let after: Vec<f32> = s.particles().particles().iter().map(|p| p.life).collect();
    assert_eq!(before, after, "no ticking after stop");
}

#[test]
fn particles_vanish_after_a_hundred_frames() {
    let viz = VisualizationLoop::default();
    viz.start();
    let mut s = seeded_session(4);
    s.click_burst(Vec2::new(10.0, 10.0));
    let mut surface = RecordingSurface::new(800.0, 600.0);
    for _ in 0..99 {
        viz.particle_frame(&mut s, &mut surface);
    }
    assert_eq!(s.particle_count(), 15);
    surface.clear();
    let (_, live) = viz.particle_frame(&mut s, &mut surface);
    assert_eq!(live, 0);
    assert_eq!(surface.calls.len(), 1, "only the fade remains");
}

#[test]
fn waveform_frame_fades_fills_and_strokes() {
    let viz = VisualizationLoop::default();
    viz.start();
    let mut s = seeded_session(5);
    s.on_mood_event(&moodflow_core::MoodEvent {
        label: "Calm".into(),
        color: "#87CEEB".into(),
        glyph: "🌊".into(),
        timestamp: 0.0,
        originator_id: "user_other".into(),
    })
    .unwrap();
    let mut surface = RecordingSurface::new(400.0, 100.0);

    assert_eq!(viz.waveform_frame(&s, &mut surface), FrameOutcome::Continue);

    let look = LookConfig::default();
    assert_eq!(surface.calls.len(), 3);
    assert_eq!(surface.calls[0], DrawCall::Fade(look.wave_veil));
    match &surface.calls[1] {
        DrawCall::FillWave(shape, gradient) => {
            assert_eq!(shape.width, 400.0);
            assert_eq!(shape.height, 100.0);
            assert_eq!(gradient.top, look.wave_gradient_top);
            assert_eq!(gradient.bottom, look.wave_gradient_bottom);
            let last = shape.points().last().expect("curve has points");
            let expected = 100.0 - Color::new(0x87, 0xCE, 0xEB).brightness() * 80.0 - 10.0;
            assert!((last.y - expected).abs() < 1e-3);
        }
        other => panic!("expected fill, got {other:?}"),
    }
    match &surface.calls[2] {
        DrawCall::StrokeWave(_, color, width) => {
            assert_eq!(*color, look.wave_stroke);
            assert_eq!(*width, 2.0);
        }
        other => panic!("expected stroke, got {other:?}"),
    }
}

#[test]
fn zero_sized_wave_surface_draws_only_the_fade() {
    let viz = VisualizationLoop::default();
    viz.start();
    let s = seeded_session(6);
    let mut surface = RecordingSurface::new(0.0, 100.0);
    viz.waveform_frame(&s, &mut surface);
    assert_eq!(surface.calls.len(), 1);
    assert!(matches!(surface.calls[0], DrawCall::Fade(_)));
}

#[test]
fn single_sample_history_still_draws_a_degenerate_curve() {
    let mut config = SessionConfig::default();
    config.waveform_capacity = 1;
    let s = moodflow_core::MoodSession::new(config, moodflow_core::SequenceRandom::constant(0.3))
        .unwrap();
    let viz = VisualizationLoop::default();
    viz.start();
    let mut surface = RecordingSurface::new(400.0, 100.0);
    viz.waveform_frame(&s, &mut surface);
    assert_eq!(surface.calls.len(), 3);
    match &surface.calls[1] {
        DrawCall::FillWave(shape, _) => {
            assert_eq!(shape.points().count(), 1);
            assert!(shape.segments.is_empty());
        }
        other => panic!("expected fill, got {other:?}"),
    }
}

#[test]
fn resized_surfaces_keep_the_particle_set() {
    let viz = VisualizationLoop::default();
    viz.start();
    let mut s = seeded_session(7);
    s.click_burst(Vec2::new(50.0, 50.0));
    let mut small = RecordingSurface::new(200.0, 150.0);
    viz.particle_frame(&mut s, &mut small);
    let mut large = RecordingSurface::new(1600.0, 900.0);
    let (_, live) = viz.particle_frame(&mut s, &mut large);
    assert_eq!(live, 15);
    assert_eq!(large.sprites().count(), 15);
}
