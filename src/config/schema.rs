//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the price gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, advertised name).
    pub listener: ListenerConfig,

    /// The price-lookup service requests are forwarded to.
    pub downstream: DownstreamConfig,

    /// Static page served at the root path.
    pub static_files: StaticFilesConfig,

    /// Request limits.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Name reported by the health endpoint.
    pub name: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            name: "Gateway".to_string(),
        }
    }
}

/// Downstream price-lookup service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DownstreamConfig {
    /// Human-readable backend name used in availability errors.
    pub name: String,

    /// Base URL (scheme, host and port), e.g. "http://localhost:5000".
    pub base_url: String,

    /// Path appended to `base_url` for price lookups.
    pub path: String,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Total time allowed for the downstream call in seconds.
    pub request_timeout_secs: u64,
}

impl Default for DownstreamConfig {
    fn default() -> Self {
        Self {
            name: "Flask".to_string(),
            base_url: "http://localhost:5000".to_string(),
            path: "/bestprice".to_string(),
            connect_timeout_secs: 5,
            request_timeout_secs: 30,
        }
    }
}

impl DownstreamConfig {
    /// Full endpoint URL the gateway POSTs to.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.path)
    }
}

/// Static file configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// HTML file returned for `GET /`.
    pub index_path: String,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            index_path: "index.html".to_string(),
        }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes, applied to requests and downstream replies.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 50 * 1024 * 1024, // 50MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
