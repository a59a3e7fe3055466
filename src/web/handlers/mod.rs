//! API handlers for the relay.

pub mod relay;

pub use relay::*;

use std::sync::Arc;

use crate::chat::Coordinator;

/// Shared application state for handlers.
#[derive(Clone)]
pub struct AppState {
    /// The coordinator every request is routed to.
    pub coordinator: Arc<Coordinator>,
}

impl AppState {
    pub fn new(coordinator: Arc<Coordinator>) -> Self {
        Self { coordinator }
    }
}
