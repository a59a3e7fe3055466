//! Chat relay core.
//!
//! This module provides the coordinator side of the relay:
//! - Chat events and the `"system"` notice sentinel
//! - The append-only message log and the membership table
//! - The join/send/leave coordinator operations
//! - The fan-out dispatcher that pushes events to participants

mod coordinator;
mod delivery;
mod dispatcher;
mod event;
mod history;
mod membership;
mod state;

pub use coordinator::{Coordinator, DEFAULT_QUEUE_CAPACITY};
pub use delivery::{callback_url, Deliver, HttpDeliverer, DELIVER_PATH};
pub use dispatcher::{DispatchReport, FanoutDispatcher};
pub use event::{ChatEvent, FanoutJob, ParticipantId, SYSTEM_ORIGIN};
pub use history::MessageLog;
pub use membership::{MembershipTable, Participant};
pub use state::{shared_state, RelayState, SharedState};
