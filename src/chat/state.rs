//! Shared coordinator state.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::history::MessageLog;
use super::membership::MembershipTable;

/// Membership table and message log, guarded together by one lock.
#[derive(Debug, Default)]
pub struct RelayState {
    pub members: MembershipTable,
    pub log: MessageLog,
}

/// Handle to the state shared by the coordinator and the dispatcher.
pub type SharedState = Arc<Mutex<RelayState>>;

/// Create empty shared state.
pub fn shared_state() -> SharedState {
    Arc::new(Mutex::new(RelayState::default()))
}
