//! HTTP surface of the coordinator.
//!
//! The three inbound operations are exposed as JSON endpoints under `/api`.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::RelayServer;
