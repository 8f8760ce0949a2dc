//! Mood broadcasts as they cross the transport boundary.

use crate::color::Color;
use crate::error::{MoodError, Result};
use serde::{Deserialize, Serialize};

/// What a user picks to broadcast: a label, a color and a glyph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mood {
    pub label: String,
    pub color: String,
    pub glyph: String,
}

impl Mood {
    pub fn new(label: impl Into<String>, color: impl Into<String>, glyph: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
            glyph: glyph.into(),
        }
    }
}

/// One broadcast on the wire.
///
/// Field names follow the JSON the room channel carries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoodEvent {
    #[serde(rename = "vibe")]
    pub label: String,
    pub color: String,
    #[serde(rename = "emoji")]
    pub glyph: String,
    /// Milliseconds since the Unix epoch at publish time.
    pub timestamp: f64,
    #[serde(rename = "userId")]
    pub originator_id: String,
}

impl MoodEvent {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| MoodError::MalformedEvent(e.to_string()))
    }

    pub fn parsed_color(&self) -> Result<Color> {
        Color::parse_hex(&self.color)
    }

    #[inline]
    pub fn glyph(&self) -> Option<&str> {
        Some(self.glyph.as_str()).filter(|g| !g.is_empty())
    }
}
