//! Request telemetry and response hardening.
//!
//! Every routed request gets a span and is counted under
//! `http_requests_total` / `http_request_duration_seconds`, labelled with the
//! matched route and an `access` class: `public` for routes outside the gate,
//! otherwise the gate's [`AccessOutcome`] label.

use axum::{
    extract::{MatchedPath, Request, State},
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, field};
use uuid::Uuid;

use super::AppState;
use super::auth::AccessOutcome;

const PUBLIC_ACCESS: &str = "public";

const HARDENING_HEADERS: [(&str, &str); 3] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
];

/// GET /metrics
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

pub async fn request_telemetry(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let method = req.method().clone();
    // Matched route keeps label cardinality bounded (/prime/{number})
    let route = req.extensions().get::<MatchedPath>().map_or_else(
        || req.uri().path().to_string(),
        |mp| mp.as_str().to_string(),
    );

    let span = tracing::info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %method,
        path = %req.uri().path(),
        route = %route,
        user_id = field::Empty,
        access = field::Empty,
    );

    async move {
        let response = next.run(req).await;

        let elapsed = start.elapsed();
        let status = response.status();
        let access = access_class(&response);

        let labels = [
            ("method", method.to_string()),
            ("route", route),
            ("status", status.as_u16().to_string()),
            ("access", access.to_string()),
        ];
        metrics::counter!("http_requests_total", &labels).increment(1);
        metrics::histogram!("http_request_duration_seconds", &labels)
            .record(elapsed.as_secs_f64());

        tracing::info!(
            duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            status_code = status.as_u16(),
            status_class = status_class(status),
            access,
            "Request finished"
        );

        response
    }
    .instrument(span)
    .await
}

fn access_class(response: &Response) -> &'static str {
    response
        .extensions()
        .get::<AccessOutcome>()
        .map_or(PUBLIC_ACCESS, |outcome| outcome.label())
}

fn status_class(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        "error"
    } else if status.is_client_error() {
        "client_error"
    } else {
        "success"
    }
}

pub async fn security_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;

    for (name, value) in HARDENING_HEADERS {
        response.headers_mut().insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }

    response
}
