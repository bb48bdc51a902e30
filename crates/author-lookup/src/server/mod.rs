//! HTTP JSON API for a browser front end.
//!
//! The browser owns rendering and navigation; the server runs the search,
//! keeps each visitor's selected author in a [`SessionStore`] slot, and serves
//! publication lists with chart data.

pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;

use crate::lookup::AuthorLookup;
use crate::session::SessionStore;

/// Author lookup HTTP server.
pub struct HttpServer {
    lookup: AuthorLookup,
    sessions: Arc<SessionStore>,
}

impl HttpServer {
    /// Create a new server.
    #[must_use]
    pub fn new(lookup: AuthorLookup) -> Self {
        Self { lookup, sessions: Arc::new(SessionStore::new()) }
    }

    /// Router without binding a socket (used by tests).
    #[must_use]
    pub fn router(&self) -> Router {
        routes::create_router(self.lookup.clone(), Arc::clone(&self.sessions))
    }

    /// Serve until Ctrl+C.
    ///
    /// # Errors
    ///
    /// Returns error on bind or server failure.
    pub async fn run(self, port: u16) -> anyhow::Result<()> {
        Arc::clone(&self.sessions).start_cleanup_task();

        let router = self.router();
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("HTTP server listening on http://{}", addr);

        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }
}

impl std::fmt::Debug for HttpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpServer").field("lookup", &self.lookup).finish_non_exhaustive()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
