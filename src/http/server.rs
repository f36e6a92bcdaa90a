//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS, body limit)
//! - Bind server to listener and shut down gracefully

use axum::{
    extract::{DefaultBodyLimit, Request},
    routing::{get, get_service, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeFile,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::downstream::{DownstreamClient, DownstreamError};
use crate::http::handlers::{get_best_price, health};
use crate::http::request::{request_id_header, UuidRequestId, X_REQUEST_ID};
use crate::lifecycle::ShutdownSignal;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub downstream: DownstreamClient,
    /// Name reported by the health endpoint.
    pub name: Arc<str>,
    /// Port the listener is bound to.
    pub port: u16,
}

/// HTTP server for the price gateway.
pub struct HttpServer {
    config: GatewayConfig,
    downstream: DownstreamClient,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, DownstreamError> {
        let downstream = DownstreamClient::new(&config.downstream, config.security.max_body_size)?;
        Ok(Self { config, downstream })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// `port` is what the health endpoint reports.
    pub fn router(&self, port: u16) -> Router {
        let state = AppState {
            downstream: self.downstream.clone(),
            name: Arc::from(self.config.listener.name.as_str()),
            port,
        };

        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id_header(), UuidRequestId))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
                let request_id = request
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id
                )
            }))
            .layer(PropagateRequestIdLayer::new(request_id_header()))
            .layer(CorsLayer::permissive());

        Router::new()
            .route("/getbestprice", post(get_best_price))
            .route("/health", get(health))
            .route(
                "/",
                get_service(ServeFile::new(&self.config.static_files.index_path)),
            )
            .with_state(state)
            .layer(DefaultBodyLimit::max(self.config.security.max_body_size))
            .layer(middleware)
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            downstream = %self.downstream.endpoint(),
            "HTTP server starting"
        );

        let app = self.router(addr.port());

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
