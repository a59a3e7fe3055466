//! HTTP server for the coordinator.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::chat::Coordinator;
use crate::config::ServerConfig;
use crate::Result;

use super::handlers::AppState;
use super::router::{create_health_router, create_router};

/// Coordinator listener serving the relay API.
pub struct RelayServer {
    listener: TcpListener,
    router: Router,
}

impl RelayServer {
    /// Bind the listener described by `config`.
    ///
    /// Failing to bind is fatal for the coordinator.
    pub async fn bind(config: &ServerConfig, coordinator: Arc<Coordinator>) -> Result<Self> {
        let listener = TcpListener::bind(config.bind_addr()).await?;
        let router = create_router(Arc::new(AppState::new(coordinator)))
            .merge(create_health_router());

        tracing::info!("Chat server running on {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    /// Get the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve requests until the process exits.
    ///
    /// Errors accepting individual connections are logged by the server
    /// and do not stop the listener.
    pub async fn run(self) -> Result<()> {
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }

    /// Serve requests until `shutdown` resolves.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }

    /// Spawn the server in the background and return its address.
    ///
    /// This is useful for testing when binding to port 0.
    pub fn spawn(self) -> Result<SocketAddr> {
        let local_addr = self.local_addr()?;
        tokio::spawn(async move {
            if let Err(e) = self.run().await {
                tracing::error!("Relay server error: {}", e);
            }
        });
        Ok(local_addr)
    }
}
