//! Drawing seam between the frame cycles and whatever backs a surface
//! (a canvas 2D context on the web, a recorder in tests).

use crate::color::{Color, Rgba};
use crate::particles::Particle;
use crate::waveform::WaveShape;
use glam::Vec2;

/// Pixel size of a surface at the moment it is queried.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

impl Dimensions {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SpriteShape {
    Glyph { text: String, font_px: f32 },
    Disc { radius: f32, fill: Color },
}

/// A particle resolved into draw state: placed and rotated about its own
/// position, faded by its remaining life, haloed in its color.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub position: Vec2,
    pub rotation: f32,
    pub alpha: f32,
    pub glow: Color,
    pub glow_blur: f32,
    pub shape: SpriteShape,
}

impl Sprite {
    pub fn from_particle(p: &Particle, glow_blur: f32) -> Self {
        let shape = match &p.glyph {
            Some(text) => SpriteShape::Glyph {
                text: text.clone(),
                font_px: p.size,
            },
            None => SpriteShape::Disc {
                radius: p.size / 2.0,
                fill: p.color,
            },
        };
        Self {
            position: p.position,
            rotation: p.rotation,
            alpha: p.life.clamp(0.0, 1.0),
            glow: p.color,
            glow_blur,
            shape,
        }
    }
}

/// Top-to-bottom linear gradient spanning the surface height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalGradient {
    pub top: Rgba,
    pub bottom: Rgba,
}

pub trait Surface {
    fn dimensions(&self) -> Dimensions;

    /// Composite `veil` over the whole surface. A translucent veil leaves a
    /// decaying trail of previous frames instead of a hard clear.
    fn fade(&mut self, veil: Rgba);

    fn draw_sprite(&mut self, sprite: &Sprite);

    /// Fill the region under the curve: from the bottom-left corner, along
    /// the curve, to the bottom-right corner, then closed.
    fn fill_wave(&mut self, shape: &WaveShape, gradient: &VerticalGradient);

    /// Stroke the open curve only.
    fn stroke_wave(&mut self, shape: &WaveShape, color: Rgba, line_width: f32);
}
