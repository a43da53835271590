//! per-route request counters and latencies in the Prometheus text format.
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{MatchedPath, Request, State},
    http::{header::CONTENT_TYPE, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle, PrometheusRecorder};

use crate::routes::AppState;

pub const REQUESTS_TOTAL: &str = "http_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";
const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// recorder owned by the application state, never installed as the global
/// recorder.
pub struct HttpMetrics {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
}

impl Default for HttpMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpMetrics {
    pub fn new() -> Self {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        Self { recorder, handle }
    }

    pub fn record(&self, method: &Method, path: &str, status: StatusCode, elapsed: Duration) {
        let method = method.to_string();
        let path = path.to_string();
        let status = status.as_u16().to_string();
        metrics::with_local_recorder(&self.recorder, || {
            metrics::counter!(
                REQUESTS_TOTAL,
                "method" => method.clone(),
                "path" => path.clone(),
                "status" => status.clone()
            )
            .increment(1);
            metrics::histogram!(
                REQUEST_DURATION_SECONDS,
                "method" => method,
                "path" => path,
                "status" => status
            )
            .record(elapsed.as_secs_f64());
        });
    }

    pub fn render(&self) -> String {
        self.handle.run_upkeep();
        self.handle.render()
    }
}

/// middleware recording every request routed through it, labelled with the
/// route template instead of the raw path.
pub async fn track(State(state): State<Arc<AppState>>, request: Request, next: Next) -> Response {
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| String::from("unmatched"));
    let method = request.method().clone();
    let start = Instant::now();
    let response = next.run(request).await;
    state
        .metrics
        .record(&method, &path, response.status(), start.elapsed());
    response
}

pub async fn render(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_record_and_render() {
        let metrics = HttpMetrics::new();
        metrics.record(
            &Method::GET,
            "/v1/geods-poi/search",
            StatusCode::BAD_REQUEST,
            Duration::from_millis(12),
        );
        metrics.record(
            &Method::GET,
            "/v1/geods-poi/search",
            StatusCode::BAD_REQUEST,
            Duration::from_millis(3),
        );
        let rendered = metrics.render();
        let counter = rendered
            .lines()
            .find(|l| l.starts_with(REQUESTS_TOTAL) && l.contains("status=\"400\""))
            .unwrap();
        assert!(counter.contains("path=\"/v1/geods-poi/search\""), "{counter}");
        assert!(counter.ends_with(" 2"), "{counter}");
        assert!(rendered.contains(REQUEST_DURATION_SECONDS), "{rendered}");
    }

    #[test]
    fn test_registries_are_independent() {
        let first = HttpMetrics::new();
        let second = HttpMetrics::new();
        first.record(&Method::GET, "/healthz", StatusCode::OK, Duration::ZERO);
        assert!(!second.render().contains(REQUESTS_TOTAL));
    }
}
