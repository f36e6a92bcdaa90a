//! Wire types and errors for the price-lookup service.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body POSTed to the downstream service.
///
/// The key name matches the incoming request's field exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuery {
    #[serde(rename = "productOrUrl")]
    pub product_or_url: String,
}

impl PriceQuery {
    pub fn new(product_or_url: impl Into<String>) -> Self {
        Self {
            product_or_url: product_or_url.into(),
        }
    }
}

/// A downstream response whose body parsed as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct DownstreamReply {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

/// Errors that can occur while calling the downstream service.
#[derive(Debug, Error)]
pub enum DownstreamError {
    /// Connection could not be established (refused, unreachable, connect timeout).
    #[error("{name} backend server is not running. Please start the {name} server on port {port}.")]
    Unreachable { name: String, port: u16 },

    /// Connected, but no complete response before the request deadline.
    #[error("{name} backend did not respond within {secs} seconds")]
    Timeout { name: String, secs: u64 },

    /// Response body could not be read or is not JSON.
    #[error("{0}")]
    InvalidBody(String),

    /// Any other transport failure.
    #[error("{0}")]
    Request(String),

    /// Configured endpoint is not a usable URI.
    #[error("invalid downstream endpoint `{endpoint}`: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

impl DownstreamError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            DownstreamError::Unreachable { .. } => "unreachable",
            DownstreamError::Timeout { .. } => "timeout",
            DownstreamError::InvalidBody(_) => "invalid_body",
            DownstreamError::Request(_) => "request",
            DownstreamError::InvalidEndpoint { .. } => "invalid_endpoint",
        }
    }
}
