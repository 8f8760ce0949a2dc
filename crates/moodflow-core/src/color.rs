//! Color decoding and the color → brightness mapping that feeds the waveform.

use crate::error::{MoodError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque color as three 8-bit channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decode `#RRGGBB` or `#RGB`. The `#` is optional and hex digits are
    /// case-insensitive.
    pub fn parse_hex(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(MoodError::invalid_color(input, "non-hex digit"));
        }
        match hex.len() {
            6 => Ok(Self::new(
                hex_byte(&hex[0..2]),
                hex_byte(&hex[2..4]),
                hex_byte(&hex[4..6]),
            )),
            3 => {
                let nibble = |i: usize| hex_byte(&hex[i..i + 1]) * 17;
                Ok(Self::new(nibble(0), nibble(1), nibble(2)))
            }
            _ => Err(MoodError::invalid_color(input, "expected 3 or 6 hex digits")),
        }
    }

    /// Unweighted mean of the three channels, normalized to [0, 1].
    #[inline]
    pub fn brightness(&self) -> f32 {
        (self.r as f32 + self.g as f32 + self.b as f32) / 3.0 / 255.0
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

// Input is pre-validated as ASCII hex, so this cannot fail.
#[inline]
fn hex_byte(digits: &str) -> u8 {
    u8::from_str_radix(digits, 16).unwrap_or(0)
}

impl FromStr for Color {
    type Err = MoodError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Brightness of a boundary color string such as `#RRGGBB`.
pub fn brightness(color: &str) -> Result<f32> {
    Color::parse_hex(color).map(|c| c.brightness())
}

/// A color with straight alpha, used for veils, glows and strokes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS `rgba(...)` form accepted by canvas style setters.
    pub fn css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            self.a.clamp(0.0, 1.0)
        )
    }
}
