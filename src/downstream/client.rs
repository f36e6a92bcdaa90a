//! Outbound client for the price-lookup service.
//!
//! # Responsibilities
//! - POST the query as JSON to the configured endpoint
//! - Bound the call with connect and request timeouts
//! - Read and parse the JSON reply, whatever its status
//! - Classify transport failures (unreachable vs. other)

use axum::body::Body;
use axum::http::{header, Method, Request, Uri};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::time::Duration;
use tokio::time;
use url::Url;

use crate::config::DownstreamConfig;
use crate::downstream::types::{DownstreamError, DownstreamReply, PriceQuery};

/// Shared handle to the downstream service. Cloning is cheap.
#[derive(Clone)]
pub struct DownstreamClient {
    client: Client<HttpConnector, Body>,
    endpoint: Uri,
    name: String,
    port: u16,
    request_timeout: Duration,
    max_body_size: usize,
}

impl DownstreamClient {
    /// Build a client from configuration.
    ///
    /// `max_body_size` caps how much of a downstream reply is buffered.
    pub fn new(config: &DownstreamConfig, max_body_size: usize) -> Result<Self, DownstreamError> {
        let endpoint_str = config.endpoint();
        let invalid = |reason: String| DownstreamError::InvalidEndpoint {
            endpoint: endpoint_str.clone(),
            reason,
        };

        let url = Url::parse(&endpoint_str).map_err(|e| invalid(e.to_string()))?;
        let port = url
            .port_or_known_default()
            .ok_or_else(|| invalid("no port for scheme".to_string()))?;
        let endpoint: Uri = endpoint_str.parse().map_err(|e: axum::http::uri::InvalidUri| invalid(e.to_string()))?;

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.connect_timeout_secs)));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        Ok(Self {
            client,
            endpoint,
            name: config.name.clone(),
            port,
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            max_body_size,
        })
    }

    /// Full URI requests are POSTed to.
    pub fn endpoint(&self) -> &Uri {
        &self.endpoint
    }

    /// Downstream port, explicit or the scheme default.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Forward a query and wait for the reply.
    ///
    /// Any HTTP status is returned as a reply as long as its body is JSON.
    pub async fn forward(&self, query: &PriceQuery) -> Result<DownstreamReply, DownstreamError> {
        let payload = serde_json::to_vec(query).map_err(|e| DownstreamError::Request(e.to_string()))?;

        tracing::debug!(
            endpoint = %self.endpoint,
            payload = %String::from_utf8_lossy(&payload),
            "Forwarding to downstream"
        );

        let request = Request::builder()
            .method(Method::POST)
            .uri(self.endpoint.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload))
            .map_err(|e| DownstreamError::Request(e.to_string()))?;

        let exchange = async {
            let response = self
                .client
                .request(request)
                .await
                .map_err(|e| self.classify(e))?;

            let status = response.status();
            let bytes = axum::body::to_bytes(Body::new(response.into_body()), self.max_body_size)
                .await
                .map_err(|e| DownstreamError::InvalidBody(e.to_string()))?;
            let body = serde_json::from_slice(&bytes)
                .map_err(|e| DownstreamError::InvalidBody(e.to_string()))?;

            tracing::debug!(status = %status, "Downstream responded");
            Ok(DownstreamReply { status, body })
        };

        match time::timeout(self.request_timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(DownstreamError::Timeout {
                name: self.name.clone(),
                secs: self.request_timeout.as_secs(),
            }),
        }
    }

    fn classify(&self, err: hyper_util::client::legacy::Error) -> DownstreamError {
        if err.is_connect() {
            tracing::warn!(endpoint = %self.endpoint, error = %err, "Downstream unreachable");
            DownstreamError::Unreachable {
                name: self.name.clone(),
                port: self.port,
            }
        } else {
            tracing::error!(endpoint = %self.endpoint, error = %err, "Downstream request failed");
            DownstreamError::Request(err.to_string())
        }
    }
}
