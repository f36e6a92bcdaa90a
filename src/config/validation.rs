//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and the downstream URL
//! - Validate value ranges (timeouts > 0, body limit > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("downstream.base_url `{url}` is invalid: {reason}")]
    DownstreamUrl { url: String, reason: String },

    #[error("downstream.path `{0}` must start with '/'")]
    DownstreamPath(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("downstream.connect_timeout_secs ({connect}) must be less than downstream.request_timeout_secs ({request})")]
    ConnectTimeoutTooLong { connect: u64, request: u64 },

    #[error("observability.metrics_address `{0}` is not a socket address")]
    MetricsAddress(String),

    #[error("observability.log_level `{0}` is not one of trace, debug, info, warn, error")]
    LogLevel(String),
}

/// Check a configuration, collecting every violated rule.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if let Err(reason) = check_downstream_url(&config.downstream.base_url) {
        errors.push(ValidationError::DownstreamUrl {
            url: config.downstream.base_url.clone(),
            reason,
        });
    }

    if !config.downstream.path.starts_with('/') {
        errors.push(ValidationError::DownstreamPath(config.downstream.path.clone()));
    }

    if config.downstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::Zero("downstream.connect_timeout_secs"));
    }
    if config.downstream.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero("downstream.request_timeout_secs"));
    }
    // A connect timeout must fire before the overall deadline to surface as unreachable.
    let (connect, request) = (
        config.downstream.connect_timeout_secs,
        config.downstream.request_timeout_secs,
    );
    if connect > 0 && request > 0 && connect >= request {
        errors.push(ValidationError::ConnectTimeoutTooLong { connect, request });
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero("security.max_body_size"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// The outbound connector speaks plain HTTP only.
fn check_downstream_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if url.scheme() != "http" {
        return Err(format!("unsupported scheme `{}`", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&GatewayConfig::default()), Ok(()));
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "not-an-addr".into();
        config.downstream.base_url = "https://localhost:5000".into();
        config.downstream.path = "bestprice".into();
        config.downstream.request_timeout_secs = 0;
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::BindAddress("not-an-addr".into())));
        assert!(errors.contains(&ValidationError::DownstreamPath("bestprice".into())));
        assert!(errors.contains(&ValidationError::Zero("downstream.request_timeout_secs")));
        assert!(matches!(
            errors.iter().find(|e| matches!(e, ValidationError::DownstreamUrl { .. })),
            Some(ValidationError::DownstreamUrl { reason, .. }) if reason.contains("https")
        ));
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = GatewayConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::MetricsAddress("nowhere".into())])
        );
    }

    #[test]
    fn test_connect_timeout_must_be_shorter_than_request_timeout() {
        let mut config = GatewayConfig::default();
        config.downstream.connect_timeout_secs = 30;
        config.downstream.request_timeout_secs = 30;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::ConnectTimeoutTooLong { connect: 30, request: 30 }])
        );

        config.downstream.connect_timeout_secs = 29;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_log_level_is_case_insensitive() {
        let mut config = GatewayConfig::default();
        config.observability.log_level = "DEBUG".into();
        assert!(validate_config(&config).is_ok());
    }
}
