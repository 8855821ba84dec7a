use std::sync::Arc;

use notes_store::NoteStore;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::router::build_router;

/// Note HTTP server.
pub struct NoteServer {
    config: ServerConfig,
    store: Arc<dyn NoteStore>,
}

impl NoteServer {
    pub fn new(config: ServerConfig, store: Arc<dyn NoteStore>) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(AppState::new(Arc::clone(&self.store)), self.config.max_body_bytes)
    }

    /// Bind the configured address.
    pub async fn bind(&self) -> ServerResult<TcpListener> {
        let listener = TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        Ok(listener)
    }

    /// Serve requests on `listener` until Ctrl-C.
    pub async fn serve(self, listener: TcpListener) -> ServerResult<()> {
        let app = self.router();
        let addr = listener.local_addr()?;
        tracing::info!(%addr, root = %self.config.notes_root.display(), "note server listening");
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
