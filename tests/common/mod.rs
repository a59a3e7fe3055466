//! Test helpers for end-to-end relay tests.
//!
//! Provides a running coordinator and participants with real callback
//! listeners, all bound to port 0.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::timeout;

use chatrelay::config::{DispatchConfig, ServerConfig};
use chatrelay::participant::callback_router;
use chatrelay::{ChatEvent, Coordinator, HttpDeliverer, RelayClient, RelayServer};

/// Default timeout for test operations.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// How long to wait before concluding that nothing else will arrive.
pub const QUIET_PERIOD: Duration = Duration::from_millis(300);

/// A coordinator serving on a random local port.
pub struct TestRelay {
    pub addr: SocketAddr,
    pub coordinator: Arc<Coordinator>,
}

impl TestRelay {
    /// Start a coordinator with short delivery timeouts.
    pub async fn start() -> Self {
        let dispatch = DispatchConfig {
            queue_capacity: 100,
            connect_timeout_secs: 1,
            delivery_timeout_secs: 2,
        };
        let server_config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        };

        let deliverer = HttpDeliverer::new(&dispatch).unwrap();
        let (coordinator, _dispatcher) = Coordinator::start(dispatch.queue_capacity, deliverer);
        let server = RelayServer::bind(&server_config, Arc::clone(&coordinator))
            .await
            .unwrap();
        let addr = server.spawn().unwrap();

        Self { addr, coordinator }
    }

    /// A client for this coordinator.
    pub fn client(&self) -> RelayClient {
        RelayClient::new(&self.addr.to_string()).unwrap()
    }
}

/// A participant with a live callback listener.
pub struct TestParticipant {
    pub id: String,
    pub callback: String,
    pub client: RelayClient,
    inbox: mpsc::UnboundedReceiver<ChatEvent>,
}

impl TestParticipant {
    /// Bind a callback listener without joining yet.
    pub async fn new(relay: &TestRelay, id: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let callback = listener.local_addr().unwrap().to_string();

        let (tx, inbox) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            let _ = axum::serve(listener, callback_router(tx)).await;
        });

        Self {
            id: id.to_string(),
            callback,
            client: relay.client(),
            inbox,
        }
    }

    /// Bind a callback listener and join.
    pub async fn join(relay: &TestRelay, id: &str) -> (Self, Vec<ChatEvent>) {
        let participant = Self::new(relay, id).await;
        let history = participant
            .client
            .join(&participant.id, &participant.callback)
            .await
            .unwrap();
        (participant, history)
    }

    pub async fn send(&self, body: &str) {
        self.client.send(&self.id, body).await.unwrap();
    }

    pub async fn leave(&self) {
        self.client.leave(&self.id).await.unwrap();
    }

    /// Wait for the next delivered event.
    pub async fn recv(&mut self) -> ChatEvent {
        timeout(DEFAULT_TIMEOUT, self.inbox.recv())
            .await
            .expect("timed out waiting for delivery")
            .expect("callback listener stopped")
    }

    /// Wait for the next delivered event with the given body.
    pub async fn recv_body(&mut self, body: &str) -> ChatEvent {
        loop {
            let event = self.recv().await;
            if event.body == body {
                return event;
            }
        }
    }

    /// Collect everything delivered until the inbox stays quiet.
    pub async fn drain(&mut self) -> Vec<ChatEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = timeout(QUIET_PERIOD, self.inbox.recv()).await {
            events.push(event);
        }
        events
    }
}

/// An address nothing is listening on.
pub async fn dead_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr.to_string()
}

/// An address that accepts connections but never answers.
///
/// Accepted sockets are held open for the lifetime of the test runtime.
pub async fn silent_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    addr.to_string()
}

/// Poll `check` until it returns true or the default timeout expires.
pub async fn wait_until<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + DEFAULT_TIMEOUT;
    while tokio::time::Instant::now() < deadline {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}
