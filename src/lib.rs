//! Price gateway library.
//!
//! Forwards `{"productOrUrl": ...}` requests to a price-lookup service and
//! relays its reply.

pub mod config;
pub mod downstream;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
