//! Chat events and fan-out jobs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::datetime::format_clock;

/// Origin value that marks a server-generated notice.
pub const SYSTEM_ORIGIN: &str = "system";

/// Identifier a participant registers under.
pub type ParticipantId = String;

/// One unit of chat content: a user message or a system notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEvent {
    /// Participant that produced the event, or [`SYSTEM_ORIGIN`].
    #[serde(rename = "from")]
    pub origin: ParticipantId,
    /// Message text.
    pub body: String,
    /// When the coordinator accepted the event.
    #[serde(rename = "time", default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl ChatEvent {
    /// Create an event stamped with the current time.
    pub fn new(origin: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            body: body.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a system notice.
    pub fn system(body: impl Into<String>) -> Self {
        Self::new(SYSTEM_ORIGIN, body)
    }

    /// Notice announcing that `id` joined.
    pub fn joined(id: &str) -> Self {
        Self::system(format!("User {id} joined"))
    }

    /// Notice announcing that `id` left.
    pub fn left(id: &str) -> Self {
        Self::system(format!("User {id} left"))
    }

    /// Whether this event is a server-generated notice.
    pub fn is_system(&self) -> bool {
        self.origin == SYSTEM_ORIGIN
    }

    /// Replace the timestamp with the current time.
    pub fn restamp(mut self) -> Self {
        self.timestamp = Utc::now();
        self
    }

    /// Format the event as a display line in the given timezone.
    ///
    /// `[HH:MM:SS] body` for notices, `[HH:MM:SS] origin: body` otherwise.
    pub fn format_line(&self, timezone: &str) -> String {
        let ts = format_clock(&self.timestamp, timezone);
        if self.is_system() {
            format!("[{}] {}", ts, self.body)
        } else {
            format!("[{}] {}: {}", ts, self.origin, self.body)
        }
    }
}

/// An event waiting for broadcast, with the participant it must skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FanoutJob {
    /// Event to push.
    pub event: ChatEvent,
    /// Participant that does not receive this event.
    pub exclude: ParticipantId,
}

impl FanoutJob {
    /// A job that skips the event's own origin.
    pub fn from_origin(event: ChatEvent) -> Self {
        let exclude = event.origin.clone();
        Self { event, exclude }
    }

    /// A job that skips an explicit participant.
    pub fn excluding(event: ChatEvent, exclude: impl Into<String>) -> Self {
        Self {
            event,
            exclude: exclude.into(),
        }
    }
}
