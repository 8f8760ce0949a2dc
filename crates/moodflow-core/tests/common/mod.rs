// Shared helpers for host-side tests.

#![allow(dead_code)]
use moodflow_core::{
    Dimensions, MoodSession, Rgba, SequenceRandom, SessionConfig, Sprite, Surface,
    VerticalGradient, WaveShape,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Fade(Rgba),
    Sprite(Sprite),
    FillWave(WaveShape, VerticalGradient),
    StrokeWave(WaveShape, Rgba, f32),
}

/// Surface that records every call instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub dims: Dimensions,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            dims: Dimensions::new(width, height),
            calls: Vec::new(),
        }
    }

    pub fn sprites(&self) -> impl Iterator<Item = &Sprite> {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Sprite(s) => Some(s),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Surface for RecordingSurface {
    fn dimensions(&self) -> Dimensions {
        self.dims
    }

    fn fade(&mut self, veil: Rgba) {
        self.calls.push(DrawCall::Fade(veil));
    }

    fn draw_sprite(&mut self, sprite: &Sprite) {
        self.calls.push(DrawCall::Sprite(sprite.clone()));
    }

    fn fill_wave(&mut self, shape: &WaveShape, gradient: &VerticalGradient) {
        self.calls.push(DrawCall::FillWave(shape.clone(), *gradient));
    }

    fn stroke_wave(&mut self, shape: &WaveShape, color: Rgba, line_width: f32) {
        self.calls
            .push(DrawCall::StrokeWave(shape.clone(), color, line_width));
    }
}

pub fn seeded_session(seed: u64) -> MoodSession<StdRng> {
    let mut s = MoodSession::new(SessionConfig::default(), StdRng::seed_from_u64(seed))
        .expect("default config is valid");
    s.resize(Dimensions::new(800.0, 600.0), Dimensions::new(400.0, 100.0));
    s
}

pub fn fixed_session(unit: f32) -> MoodSession<SequenceRandom> {
    let mut s = MoodSession::new(SessionConfig::default(), SequenceRandom::constant(unit))
        .expect("default config is valid");
    s.resize(Dimensions::new(800.0, 600.0), Dimensions::new(400.0, 100.0));
    s
}

#[inline]
pub fn approx(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() <= tol
}
