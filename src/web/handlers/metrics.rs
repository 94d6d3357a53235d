//! # Prometheus Scrape Handler
//!
//! Served on the observability listener only.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::metrics::{MetricsRegistry, METRICS_CONTENT_TYPE};
use crate::web::errors::ApiResult;

/// Prometheus metrics endpoint: GET /metrics
pub async fn prometheus_metrics(
    State(metrics): State<Arc<MetricsRegistry>>,
) -> ApiResult<impl IntoResponse> {
    let body = metrics.render()?;
    Ok(([(header::CONTENT_TYPE, METRICS_CONTENT_TYPE)], body))
}
