//! Response DTOs for the relay API.

use serde::{Deserialize, Serialize};

use crate::chat::ChatEvent;

/// Generic API response wrapper.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response data.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl ApiResponse<()> {
    /// Empty acknowledgment.
    pub fn ack() -> Self {
        Self::new(())
    }
}

/// Join response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinResponse {
    /// Events accepted before the join.
    pub history: Vec<ChatEvent>,
}
