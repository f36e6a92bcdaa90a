//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the `tracing` subscriber once per process
//! - Derive the filter from `RUST_LOG` or the configured level
//!
//! # Design Decisions
//! - `RUST_LOG` wins so operators can raise verbosity without touching config
//! - Configured level applies to this crate and tower_http

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a configured log level.
pub fn default_directive(log_level: &str) -> String {
    let level = log_level.to_ascii_lowercase();
    format!("price_gateway={level},tower_http={level}")
}

/// Install the global subscriber.
pub fn init(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive(log_level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
