//! Fixed-capacity brightness history and the smoothed curve drawn from it.

use crate::constants::{WAVE_BAND_FLOOR, WAVE_BAND_SPAN, WAVEFORM_CAPACITY};
use glam::Vec2;
use std::collections::VecDeque;

/// Sliding window of brightness samples, oldest first.
///
/// Starts full of zeros so the curve has no leading gap.
#[derive(Clone, Debug)]
pub struct WaveformAggregator {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl Default for WaveformAggregator {
    fn default() -> Self {
        Self::new(WAVEFORM_CAPACITY)
    }
}

impl WaveformAggregator {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: std::iter::repeat(0.0).take(capacity).collect(),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest once over capacity.
    pub fn push(&mut self, brightness: f32) {
        let v = if brightness.is_finite() {
            brightness.clamp(0.0, 1.0)
        } else {
            log::warn!("[waveform] non-finite sample {brightness}, recording 0");
            0.0
        };
        self.samples.push_back(v);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn samples(&self) -> impl ExactSizeIterator<Item = f32> + '_ {
        self.samples.iter().copied()
    }

    pub fn latest(&self) -> Option<f32> {
        self.samples.back().copied()
    }

    /// Build the smoothed curve for a `width` × `height` surface.
    ///
    /// Samples sit `width / capacity` apart. Each consecutive pair is joined
    /// by a quadratic segment whose control point is at the pair's midpoint x
    /// and the earlier sample's y.
    pub fn render(&self, width: f32, height: f32) -> WaveShape {
        let seg = if self.capacity == 0 {
            0.0
        } else {
            width / self.capacity as f32
        };
        let y_of = |v: f32| height - v * height * WAVE_BAND_SPAN - height * WAVE_BAND_FLOOR;

        let mut points = self
            .samples
            .iter()
            .enumerate()
            .map(|(i, &v)| Vec2::new(i as f32 * seg, y_of(v)));
        let Some(start) = points.next() else {
            return WaveShape::empty(width, height);
        };
        let mut prev = start;
        let segments = points
            .map(|p| {
                let s = QuadSegment {
                    control: Vec2::new((prev.x + p.x) / 2.0, prev.y),
                    to: p,
                };
                prev = p;
                s
            })
            .collect();
        WaveShape {
            width,
            height,
            start: Some(start),
            segments,
        }
    }
}

/// One quadratic Bézier piece, continuing from the previous end point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadSegment {
    pub control: Vec2,
    pub to: Vec2,
}

/// The curve through every sample, plus the surface size it was laid out
/// for. Close it along the bottom edge to get a fillable region.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveShape {
    pub width: f32,
    pub height: f32,
    pub start: Option<Vec2>,
    pub segments: Vec<QuadSegment>,
}

impl WaveShape {
    fn empty(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            start: None,
            segments: Vec::new(),
        }
    }

    /// True when there is no curve to draw.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start.is_none()
    }

    /// Bottom-left corner where the filled region begins.
    #[inline]
    pub fn region_left(&self) -> Vec2 {
        Vec2::new(0.0, self.height)
    }

    /// Bottom-right corner where the filled region closes.
    #[inline]
    pub fn region_right(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Every point the curve passes through, in order.
    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.start
            .into_iter()
            .chain(self.segments.iter().map(|s| s.to))
    }
}
