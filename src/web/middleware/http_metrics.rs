//! # HTTP Request Metrics
//!
//! Records a request counter and a latency histogram for every request that
//! reaches the task API router.

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;
use std::time::Instant;

use crate::metrics::MetricsRegistry;

/// Endpoint label used when no route matched
pub const UNMATCHED_ENDPOINT: &str = "unmatched";

/// Observe method, matched route and status of each request
///
/// The route template is used as the endpoint label so label cardinality
/// stays bounded by the route table.
pub async fn track_http_metrics(
    State(metrics): State<Arc<MetricsRegistry>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_ENDPOINT.to_owned());

    let started = Instant::now();
    let response = next.run(request).await;

    metrics.observe_http_request(
        &method,
        &endpoint,
        response.status().as_u16(),
        started.elapsed(),
    );

    response
}
