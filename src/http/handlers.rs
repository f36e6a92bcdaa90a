//! Route handlers.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

use crate::downstream::DownstreamClient;
use crate::http::request::{parse_price_request, request_id};
use crate::http::response::GatewayError;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub port: u16,
}

/// `POST /getbestprice`: forward the product or URL and relay the reply.
pub async fn get_best_price(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, GatewayError> {
    let start = Instant::now();
    let request_id = request_id(&headers);

    let result = match body {
        Ok(body) => forward_price_request(&state.downstream, &headers, &body, request_id).await,
        Err(rejection) => {
            tracing::warn!(request_id = %request_id, error = %rejection, "Unreadable request body");
            Err(rejection.into())
        }
    };

    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => e.status_code(),
    };
    metrics::record_request("getbestprice", status.as_u16(), start);
    result
}

async fn forward_price_request(
    downstream: &DownstreamClient,
    headers: &HeaderMap,
    body: &[u8],
    request_id: &str,
) -> Result<Json<Value>, GatewayError> {
    let query = parse_price_request(headers, body).inspect_err(|_| {
        tracing::warn!(request_id = %request_id, "No productOrUrl found in request");
    })?;

    tracing::info!(
        request_id = %request_id,
        product_or_url = %query.product_or_url,
        "Forwarding price request"
    );

    match downstream.forward(&query).await {
        Ok(reply) if reply.status.is_success() => Ok(Json(reply.body)),
        Ok(reply) => {
            tracing::warn!(
                request_id = %request_id,
                status = %reply.status,
                "Downstream returned error response"
            );
            Err(GatewayError::Upstream {
                status: reply.status,
                body: reply.body,
            })
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Price request failed");
            metrics::record_downstream_error(e.kind());
            Err(e.into())
        }
    }
}

/// `GET /health`: liveness of the gateway itself. Never calls downstream.
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: format!("{} server running", state.name),
        port: state.port,
    })
}
