//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, extract productOrUrl)
//!     → handlers.rs (forward via downstream client)
//!     → response.rs (passthrough or normalized JSON error)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::{ErrorBody, GatewayError};
pub use server::HttpServer;
