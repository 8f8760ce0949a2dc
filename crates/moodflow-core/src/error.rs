/// Result alias that carries [`MoodError`].
pub type Result<T> = std::result::Result<T, MoodError>;

/// Error type for the core crate.
///
/// None of these are fatal to the render loops; callers log and move on.
#[derive(Debug, thiserror::Error)]
pub enum MoodError {
    /// A color value that does not decode to three 8-bit channels.
    #[error("invalid color {input:?}: {reason}")]
    InvalidColor { input: String, reason: &'static str },
    /// Publish or subscribe failed at the transport boundary.
    #[error("transport failure: {0}")]
    TransportFailure(String),
    /// An inbound message that could not be decoded as a mood event.
    #[error("malformed mood event: {0}")]
    MalformedEvent(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl MoodError {
    pub fn transport<T: Into<String>>(msg: T) -> Self {
        Self::TransportFailure(msg.into())
    }

    pub(crate) fn invalid_color(input: &str, reason: &'static str) -> Self {
        Self::InvalidColor {
            input: input.to_string(),
            reason,
        }
    }
}

impl From<serde_json::Error> for MoodError {
    fn from(value: serde_json::Error) -> Self {
        Self::MalformedEvent(value.to_string())
    }
}
