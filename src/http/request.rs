//! Request handling.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4) unless the caller supplied one
//! - Extract `productOrUrl` from a JSON or form-encoded price request body
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - The extracted value is never trimmed or normalized

use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Request};
use serde_json::Value;
use tower_http::request_id::{MakeRequestId, RequestId};
use url::form_urlencoded;
use uuid::Uuid;

use crate::downstream::PriceQuery;
use crate::http::response::GatewayError;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Field read from the incoming JSON body.
pub const PRODUCT_FIELD: &str = "productOrUrl";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub fn request_id_header() -> HeaderName {
    HeaderName::from_static(X_REQUEST_ID)
}

/// Generates a fresh UUID v4 for requests that arrive without an ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Read the request ID set by the request-ID layer.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Whether the headers declare an HTML form body.
pub fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.trim_start().to_ascii_lowercase().starts_with(FORM_CONTENT_TYPE))
        .unwrap_or(false)
}

/// Parse a price request body into the query to forward.
///
/// Form bodies are read as `productOrUrl=...`; everything else must be a JSON
/// object with a string `productOrUrl`. Empty or missing values are rejected
/// and other fields are ignored.
pub fn parse_price_request(headers: &HeaderMap, body: &[u8]) -> Result<PriceQuery, GatewayError> {
    let product = if is_form(headers) {
        form_urlencoded::parse(body)
            .find(|(key, _)| key == PRODUCT_FIELD)
            .map(|(_, value)| value.into_owned())
    } else {
        serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|value| value.get(PRODUCT_FIELD)?.as_str().map(str::to_string))
    };

    match product {
        Some(product) if !product.is_empty() => Ok(PriceQuery::new(product)),
        _ => Err(GatewayError::MissingProduct),
    }
}
