//! Response handling.
//!
//! # Responsibilities
//! - Map every handler failure to a status code and JSON body
//! - Pass downstream application errors through verbatim
//!
//! # Design Decisions
//! - All failures carry `{"error": string}` except passthrough replies
//! - Unreachable/timeout messages are synthesized, never raw transport text
//! - Remaining failures expose their message behind a `Server error:` prefix

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::downstream::DownstreamError;

/// JSON body for gateway-generated errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// Every way a price request can fail.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Body lacked a non-empty `productOrUrl`.
    #[error("No product or URL provided")]
    MissingProduct,

    /// Body could not be read, e.g. it exceeded the size limit.
    #[error("{}", .0.body_text())]
    Body(#[from] BytesRejection),

    /// Downstream answered with a non-success status.
    #[error("downstream responded with {status}")]
    Upstream { status: StatusCode, body: Value },

    #[error(transparent)]
    Downstream(#[from] DownstreamError),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::MissingProduct => StatusCode::BAD_REQUEST,
            GatewayError::Body(rejection) => rejection.status(),
            GatewayError::Upstream { status, .. } => *status,
            GatewayError::Downstream(DownstreamError::Unreachable { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::Downstream(DownstreamError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::Downstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            GatewayError::Upstream { body, .. } => return (status, Json(body)).into_response(),
            GatewayError::Downstream(
                err @ (DownstreamError::Unreachable { .. } | DownstreamError::Timeout { .. }),
            ) => err.to_string(),
            GatewayError::Downstream(err) => format!("Server error: {}", err),
            err @ (GatewayError::MissingProduct | GatewayError::Body(_)) => err.to_string(),
        };
        (status, Json(ErrorBody::new(message))).into_response()
    }
}
