//! # Web API Route Definitions
//!
//! Route groups for the task API listener and the metrics listener.

use axum::routing::{any, get, post};
use axum::Router;
use std::sync::Arc;

use crate::constants::routes;
use crate::metrics::MetricsRegistry;
use crate::web::handlers;
use crate::web::state::AppState;

/// Task CRUD routes
///
/// Mutation routes only accept POST; other verbs fall through to a JSON 405.
/// Listing answers any verb.
pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route(routes::LIST_TASKS, any(handlers::tasks::list_tasks))
        .route(
            routes::ADD_TASK,
            post(handlers::tasks::add_task).fallback(handlers::tasks::method_not_allowed),
        )
        .route(
            routes::COMPLETE_TASK,
            post(handlers::tasks::complete_task).fallback(handlers::tasks::method_not_allowed),
        )
        .route(
            routes::DELETE_TASK,
            post(handlers::tasks::delete_task).fallback(handlers::tasks::method_not_allowed),
        )
}

/// Health routes served next to the task API; they answer any verb
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route(routes::HEALTH, any(handlers::health::health))
        .route(routes::METRICS_HEALTH, any(handlers::health::metrics_health))
}

/// Prometheus scrape route for the observability listener
pub fn metrics_routes() -> Router<Arc<MetricsRegistry>> {
    Router::new().route(routes::METRICS, get(handlers::metrics::prometheus_metrics))
}
