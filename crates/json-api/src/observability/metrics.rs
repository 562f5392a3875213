//! Prometheus metrics for the purchase ledger and the `/metrics` endpoint.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use salvo::{
    Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
    prelude::StatusError,
};
use tracing::error;

use crate::extensions::*;

const LATENCY_BUCKETS: [f64; 9] = [0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 1.0, 5.0];

#[derive(Debug)]
struct ServerMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    purchase_outcomes_total: IntCounterVec,
}

impl ServerMetrics {
    fn build() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new(
                "purchases_json_http_requests_total",
                "HTTP requests by method, route and status.",
            ),
            &["method", "route", "status_class", "status_code"],
        )?;
        let request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "purchases_json_http_request_duration_seconds",
                "HTTP request latency by method and route.",
            )
            .buckets(LATENCY_BUCKETS.to_vec()),
            &["method", "route"],
        )?;
        let requests_in_flight = IntGauge::new(
            "purchases_json_http_requests_in_flight",
            "HTTP requests currently being served.",
        )?;
        let purchase_outcomes_total = IntCounterVec::new(
            Opts::new(
                "purchases_json_purchase_outcomes_total",
                "Purchase writes and duplicate decisions by outcome.",
            ),
            &["outcome"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration_seconds.clone()))?;
        registry.register(Box::new(requests_in_flight.clone()))?;
        registry.register(Box::new(purchase_outcomes_total.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            request_duration_seconds,
            requests_in_flight,
            purchase_outcomes_total,
        })
    }
}

static SERVER_METRICS: OnceLock<Option<ServerMetrics>> = OnceLock::new();

fn metrics() -> Option<&'static ServerMetrics> {
    SERVER_METRICS
        .get_or_init(|| {
            ServerMetrics::build()
                .inspect_err(|source| error!("failed to build metrics registry: {source}"))
                .ok()
        })
        .as_ref()
}

/// Holds the in-flight gauge up for the lifetime of a request.
#[derive(Debug)]
pub(super) struct InFlightRequestGuard(Option<&'static IntGauge>);

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let gauge = metrics().map(|metrics| &metrics.requests_in_flight);

        if let Some(gauge) = gauge {
            gauge.inc();
        }

        Self(gauge)
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if let Some(gauge) = self.0 {
            gauge.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_class = match status_code / 100 {
        1 => "1xx",
        2 => "2xx",
        3 => "3xx",
        4 => "4xx",
        5 => "5xx",
        _ => "other",
    };

    metrics
        .requests_total
        .with_label_values(&[method, route, status_class, status_code.to_string().as_str()])
        .inc();
    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count a purchase outcome: `submitted`, `inserted` or `duplicate`.
pub(crate) fn record_purchase_outcome(outcome: &str) {
    if let Some(metrics) = metrics() {
        metrics
            .purchase_outcomes_total
            .with_label_values(&[outcome])
            .inc();
    }
}

#[handler]
pub(crate) async fn metrics_handler(res: &mut Response) -> Result<StatusCode, StatusError> {
    let metrics = metrics()
        .ok_or_else(|| StatusError::internal_server_error().brief("Metrics registry unavailable"))?;

    let encoder = TextEncoder::new();
    let mut encoded = Vec::new();

    encoder
        .encode(&metrics.registry.gather(), &mut encoded)
        .or_500("failed to encode metrics response")?;

    let content_type = HeaderValue::from_str(encoder.format_type())
        .or_500("failed to encode metrics content type header")?;

    res.headers_mut().insert(CONTENT_TYPE, content_type);
    res.render(String::from_utf8_lossy(&encoded).into_owned());

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::{
        Router, Service,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn metrics_endpoint_reports_requests_and_outcomes() -> TestResult {
        observe_request("GET", "/purchases/{buyer}", 200, 0.042);
        record_purchase_outcome("duplicate");

        let _guard = InFlightRequestGuard::track();

        let service =
            Service::new(Router::new().push(Router::with_path("metrics").get(metrics_handler)));

        let body = TestClient::get("http://example.com/metrics")
            .send(&service)
            .await
            .take_string()
            .await?;

        assert!(
            body.contains("purchases_json_http_requests_total{method=\"GET\",route=\"/purchases/{buyer}\""),
            "expected labelled request counter, got {body}"
        );
        assert!(
            body.contains("purchases_json_purchase_outcomes_total{outcome=\"duplicate\"}"),
            "expected purchase outcome counter, got {body}"
        );
        assert!(
            body.contains("purchases_json_http_requests_in_flight"),
            "expected in-flight gauge, got {body}"
        );

        Ok(())
    }
}
