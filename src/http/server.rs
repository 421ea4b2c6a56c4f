//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the forwarding handler
//! - Wire up middleware (access log, CORS, body limit, tracing)
//! - Serve on a bound listener until the shutdown signal fires
//!
//! Each request runs on its own task; the only state shared between them is
//! the upstream connection pool.

use std::net::SocketAddr;

use axum::{middleware, routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::config::ProxyConfig;
use crate::forward::{forward, ForwardState};
use crate::http::middleware::{access_log, cors_layer};

/// Error type for server construction.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),
}

/// HTTP server for the CORS proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        let state = ForwardState::new(&config.forwarding)?;
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: ForwardState) -> Router {
        let path = config.forwarding.path.as_str();
        let router = if path == "/" {
            Router::new()
                .route("/", any(forward))
                .route("/{*path}", any(forward))
        } else {
            Router::new().route(path, any(forward))
        };
        let router = router.with_state(state);

        let router = match config.forwarding.max_body_bytes {
            Some(limit) => router.layer(RequestBodyLimitLayer::new(limit)),
            None => router,
        };

        router
            .layer(cors_layer(&config.cors))
            .layer(middleware::from_fn(access_log))
            .layer(TraceLayer::new_for_http())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path = %self.config.forwarding.path,
            timeout_secs = self.config.forwarding.timeout_secs,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
