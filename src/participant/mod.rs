//! Participant side of the relay.
//!
//! A participant calls join/send/leave on the coordinator through
//! [`RelayClient`] and serves the deliver callback with
//! [`callback_router`].

mod callback;
mod client;

pub use callback::{callback_bind_addr, callback_router};
pub use client::RelayClient;

pub use crate::chat::callback_url;
