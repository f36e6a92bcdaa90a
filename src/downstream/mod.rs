//! Downstream price-lookup service.
//!
//! # Data Flow
//! ```text
//! PriceQuery (validated productOrUrl)
//!     → client.rs (POST JSON, bounded by timeouts)
//!     → DownstreamReply { status, body }   on any JSON response
//!     → DownstreamError                    on transport/parse failure
//! ```
//!
//! # Design Decisions
//! - Single configured endpoint; no routing or load balancing
//! - No retries: the request is POSTed exactly once
//! - Non-2xx replies are data, not errors; the HTTP layer passes them through

pub mod client;
pub mod types;

pub use client::DownstreamClient;
pub use types::{DownstreamError, DownstreamReply, PriceQuery};
