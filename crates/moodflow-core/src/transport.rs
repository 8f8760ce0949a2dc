//! Seam to the pub/sub transport that carries mood events between sessions.

use crate::error::{MoodError, Result};
use crate::mood::MoodEvent;
use std::collections::{BTreeSet, VecDeque};

/// Channel membership for the session's current room.
pub trait RoomTransport {
    fn subscribe(&mut self, channel: &str) -> Result<()>;
    fn unsubscribe(&mut self, channel: &str) -> Result<()>;
}

/// Outbound broadcasts. A successful return means the transport accepted
/// the event; the echo, if any, arrives later as an inbound message.
pub trait MoodPublisher {
    fn publish(&mut self, channel: &str, event: &MoodEvent) -> Result<()>;
}

/// Room occupancy as displayed: the transport's reported count, or 1 (this
/// session) when the count is missing, zero or not a number.
pub fn displayed_occupancy(reported: Option<f64>) -> u32 {
    match reported {
        Some(n) if n.is_finite() && n >= 1.0 => n.min(u32::MAX as f64) as u32,
        _ => 1,
    }
}

/// In-process transport: remembers every call and echoes publishes on
/// subscribed channels back as wire JSON. Backs offline mode and tests.
#[derive(Debug, Default)]
pub struct LoopbackTransport {
    subscribed: BTreeSet<String>,
    published: Vec<(String, MoodEvent)>,
    echoes: VecDeque<String>,
    failing: bool,
}

impl LoopbackTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every call fails with `TransportFailure`.
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    pub fn is_subscribed(&self, channel: &str) -> bool {
        self.subscribed.contains(channel)
    }

    pub fn subscriptions(&self) -> impl Iterator<Item = &str> {
        self.subscribed.iter().map(String::as_str)
    }

    pub fn published(&self) -> &[(String, MoodEvent)] {
        &self.published
    }

    /// Take the pending echoes in publish order.
    /// Only this session is ever present on a loopback channel.
    pub fn occupancy(&self, channel: &str) -> Option<f64> {
        self.subscribed.contains(channel).then_some(1.0)
    }

    pub fn drain_echoes(&mut self) -> Vec<String> {
        self.echoes.drain(..).collect()
    }

    fn check(&self, op: &str, channel: &str) -> Result<()> {
        if self.failing {
            return Err(MoodError::transport(format!("{op} {channel}: loopback offline")));
        }
        Ok(())
    }
}

impl RoomTransport for LoopbackTransport {
    fn subscribe(&mut self, channel: &str) -> Result<()> {
        self.check("subscribe", channel)?;
        self.subscribed.insert(channel.to_string());
        Ok(())
    }

    fn unsubscribe(&mut self, channel: &str) -> Result<()> {
        self.check("unsubscribe", channel)?;
        self.subscribed.remove(channel);
        Ok(())
    }
}

impl MoodPublisher for LoopbackTransport {
    fn publish(&mut self, channel: &str, event: &MoodEvent) -> Result<()> {
        self.check("publish", channel)?;
        if self.subscribed.contains(channel) {
            self.echoes.push_back(event.to_json()?);
        }
        self.published.push((channel.to_string(), event.clone()));
        Ok(())
    }
}
