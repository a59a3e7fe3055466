//! HTTP client for the coordinator API.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::chat::ChatEvent;
use crate::web::dto::{ApiResponse, JoinRequest, JoinResponse, LeaveRequest, SendRequest};
use crate::web::error::ErrorBody;
use crate::{RelayError, Result};

/// Timeout for a single call to the coordinator.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Client for one coordinator.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
    base_url: String,
}

impl RelayClient {
    /// Create a client for the coordinator at `addr` (`host:port` or URL).
    pub fn new(addr: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| RelayError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: crate::chat::callback_url(addr),
        })
    }

    /// Join and return the history accepted before this participant.
    pub async fn join(&self, id: &str, callback: &str) -> Result<Vec<ChatEvent>> {
        let req = JoinRequest {
            id: id.to_string(),
            callback: callback.to_string(),
        };
        let response: ApiResponse<JoinResponse> = self.call("/api/join", &req).await?;
        Ok(response.data.history)
    }

    /// Send a message.
    pub async fn send(&self, from: &str, body: &str) -> Result<()> {
        let _: ApiResponse<()> = self
            .call("/api/send", &SendRequest::new(from, body))
            .await?;
        Ok(())
    }

    /// Leave.
    pub async fn leave(&self, id: &str) -> Result<()> {
        let req = LeaveRequest { id: id.to_string() };
        let _: ApiResponse<()> = self.call("/api/leave", &req).await?;
        Ok(())
    }

    async fn call<Req, Resp>(&self, path: &str, req: &Req) -> Result<Resp>
    where
        Req: serde::Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(req)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(response.json().await?)
    }
}

async fn error_from_response(response: Response) -> RelayError {
    let status = response.status();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error.message,
        Err(_) => format!("HTTP {status}"),
    };

    if status == StatusCode::BAD_REQUEST {
        RelayError::InvalidArgument(message)
    } else {
        RelayError::Transport(message)
    }
}
