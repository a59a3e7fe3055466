//! Outbound push of events to participant callback endpoints.

use std::future::Future;

use reqwest::Client;

use super::event::ChatEvent;
use super::membership::Participant;
use crate::config::DispatchConfig;
use crate::error::DeliveryError;
use crate::{RelayError, Result};

/// Path of the deliver operation on a participant's callback listener.
pub const DELIVER_PATH: &str = "/deliver";

/// User agent string for outbound deliveries.
const USER_AGENT: &str = concat!("chatrelay/", env!("CARGO_PKG_VERSION"));

/// Something that can push one event to one participant.
pub trait Deliver: Send + Sync + 'static {
    /// Push `event` to `target`.
    fn deliver(
        &self,
        target: &Participant,
        event: &ChatEvent,
    ) -> impl Future<Output = std::result::Result<(), DeliveryError>> + Send;
}

/// Turn a callback address into the base URL the coordinator dials.
///
/// Accepts `host:port`, `:port` (loopback), or a full `http(s)://` URL.
pub fn callback_url(address: &str) -> String {
    let address = address.trim();
    if address.starts_with("http://") || address.starts_with("https://") {
        address.trim_end_matches('/').to_string()
    } else if address.starts_with(':') {
        format!("http://127.0.0.1{address}")
    } else {
        format!("http://{address}")
    }
}

/// Delivers events over HTTP with one short-lived connection per call.
#[derive(Debug, Clone)]
pub struct HttpDeliverer {
    client: Client,
}

impl HttpDeliverer {
    /// Create a deliverer with the configured timeouts.
    pub fn new(config: &DispatchConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.delivery_timeout())
            .pool_max_idle_per_host(0)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RelayError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl Deliver for HttpDeliverer {
    async fn deliver(
        &self,
        target: &Participant,
        event: &ChatEvent,
    ) -> std::result::Result<(), DeliveryError> {
        let url = format!("{}{}", callback_url(&target.callback), DELIVER_PATH);

        let response = self
            .client
            .post(&url)
            .json(event)
            .send()
            .await
            .map_err(|e| classify(&target.callback, &e))?;

        if !response.status().is_success() {
            return Err(DeliveryError::Rejected {
                address: target.callback.clone(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        Ok(())
    }
}

/// Connect failures and timeouts mean the participant is gone.
fn classify(address: &str, e: &reqwest::Error) -> DeliveryError {
    if e.is_connect() || e.is_timeout() || e.is_builder() {
        DeliveryError::Unreachable {
            address: address.to_string(),
            reason: e.to_string(),
        }
    } else {
        DeliveryError::Rejected {
            address: address.to_string(),
            reason: e.to_string(),
        }
    }
}
