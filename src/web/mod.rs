//! # Web API Module
//!
//! Axum-based HTTP surface for the task list.
//!
//! ## Core Components
//!
//! - [`routes`] - HTTP route definitions and organization
//! - [`handlers`] - Request handlers for tasks, health and metrics
//! - [`middleware`] - Request ids, HTTP metrics and CORS
//! - [`extractors`] - Form field extraction and input validation
//! - [`errors`] - API error type and JSON error bodies
//! - [`state`] - Shared application state

pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use std::sync::Arc;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::metrics::MetricsRegistry;
use state::AppState;

/// Create the task API application with all routes and middleware
///
/// CORS sits outside routing so preflight requests are answered for every
/// path, including the mutation routes that only accept POST.
pub fn create_app(app_state: AppState) -> Router {
    let request_timeout = app_state.config.web.request_timeout;
    let cors = middleware::create_cors_layer(&app_state.config.web.cors_allowed_origins);
    let metrics = Arc::clone(&app_state.metrics);

    Router::new()
        .merge(routes::task_routes())
        .merge(routes::health_routes())
        .layer(axum::middleware::from_fn_with_state(
            metrics,
            middleware::http_metrics::track_http_metrics,
        ))
        .layer(axum::middleware::from_fn(
            middleware::request_id::add_request_id,
        ))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Create the metrics application served on its own listener
pub fn create_metrics_app(metrics: Arc<MetricsRegistry>) -> Router {
    routes::metrics_routes()
        .layer(TraceLayer::new_for_http())
        .with_state(metrics)
}
