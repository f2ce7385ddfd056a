//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the downstream application
//! - Put the trimmer middleware in front of it
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener and shut down on request

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::http::middleware::Trimmer;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::i18n::CatalogError;

/// HTTP server hosting the trimmer in front of the downstream application.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails if the translation catalog cannot be loaded.
    pub fn new(config: ServerConfig) -> Result<Self, CatalogError> {
        let trimmer = Trimmer::from_config(&config.trimmer)?;
        let router = Self::build_router(&config, trimmer);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, trimmer: Trimmer) -> Router {
        trimmer
            .wrap(downstream_app())
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
            .layer(TraceLayer::new_for_http())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// The application behind the trimmer: a health probe and 404 for the rest.
pub fn downstream_app() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
