//! Request DTOs for the relay API.
//!
//! Missing fields deserialize as empty strings so that validation happens
//! in the coordinator and surfaces as an invalid argument.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chat::ChatEvent;

/// Join request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRequest {
    /// Participant id.
    #[serde(default)]
    pub id: String,
    /// Callback address the coordinator will push events to.
    #[serde(default)]
    pub callback: String,
}

/// Send request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendRequest {
    /// Sender id.
    #[serde(default)]
    pub from: String,
    /// Message text.
    #[serde(default)]
    pub body: String,
    /// Client-side timestamp. Ignored by the coordinator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

impl SendRequest {
    pub fn new(from: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            body: body.into(),
            time: Some(Utc::now()),
        }
    }

    /// Convert into an event; the timestamp is replaced on acceptance.
    pub fn into_event(self) -> ChatEvent {
        ChatEvent {
            origin: self.from,
            body: self.body,
            timestamp: self.time.unwrap_or_else(Utc::now),
        }
    }
}

/// Leave request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Participant id.
    #[serde(default)]
    pub id: String,
}
