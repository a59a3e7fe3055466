//! chatrelay - a centralized chat relay.
//!
//! A single coordinator keeps the membership table and the message log,
//! and pushes every accepted event to each other connected participant.

pub mod chat;
pub mod config;
pub mod datetime;
pub mod error;
pub mod logging;
pub mod participant;
pub mod web;

pub use chat::{
    ChatEvent, Coordinator, Deliver, FanoutDispatcher, FanoutJob, HttpDeliverer, Participant,
    SYSTEM_ORIGIN,
};
pub use config::Config;
pub use error::{DeliveryError, RelayError, Result};
pub use participant::RelayClient;
pub use web::RelayServer;
