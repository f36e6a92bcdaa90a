//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by endpoint, status
//! - `gateway_request_duration_seconds` (histogram): latency by endpoint
//! - `gateway_downstream_errors_total` (counter): failed downstream calls by kind
//!
//! Recording is a no-op until `init_metrics` installs the Prometheus exporter.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a completed request.
pub fn record_request(endpoint: &'static str, status: u16, start: Instant) {
    counter!(
        "gateway_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("gateway_request_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}

/// Record a downstream call that produced no usable reply.
pub fn record_downstream_error(kind: &'static str) {
    counter!("gateway_downstream_errors_total", "kind" => kind).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};

    fn labels(key: &metrics::Key) -> Vec<(String, String)> {
        key.labels()
            .map(|l| (l.key().to_string(), l.value().to_string()))
            .collect()
    }

    #[test]
    fn test_request_and_error_metrics_recorded() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            record_request("getbestprice", 503, Instant::now());
            record_request("getbestprice", 503, Instant::now());
            record_downstream_error("unreachable");
        });

        let snapshot = snapshotter.snapshot().into_vec();

        let requests = snapshot
            .iter()
            .find(|(k, ..)| k.key().name() == "gateway_requests_total")
            .expect("request counter missing");
        assert!(matches!(requests.3, DebugValue::Counter(2)));
        let mut request_labels = labels(requests.0.key());
        request_labels.sort();
        assert_eq!(
            request_labels,
            vec![
                ("endpoint".to_string(), "getbestprice".to_string()),
                ("status".to_string(), "503".to_string()),
            ]
        );

        let duration = snapshot
            .iter()
            .find(|(k, ..)| k.key().name() == "gateway_request_duration_seconds")
            .expect("duration histogram missing");
        assert!(matches!(&duration.3, DebugValue::Histogram(values) if values.len() == 2));

        let errors = snapshot
            .iter()
            .find(|(k, ..)| k.key().name() == "gateway_downstream_errors_total")
            .expect("downstream error counter missing");
        assert!(matches!(errors.3, DebugValue::Counter(1)));
        assert_eq!(
            labels(errors.0.key()),
            vec![("kind".to_string(), "unreachable".to_string())]
        );
    }
}
