//! # Health Check Handlers
//!
//! Health endpoints on the task API listener. Both always answer 200;
//! degradation is reported in the body.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::routes;
use crate::services::{HealthReport, HealthStatus};
use crate::web::state::AppState;

/// Where the metrics surface can be reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsEndpoints {
    pub prometheus: String,
    pub health: String,
}

/// Static descriptor returned by `GET /api/metrics/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsHealthResponse {
    pub status: HealthStatus,
    pub metrics: String,
    pub timestamp: String,
    pub endpoints: MetricsEndpoints,
}

/// Service health: GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    debug!("Performing health check");
    Json(state.health.check().await)
}

/// Metrics endpoint descriptor: GET /api/metrics/health
pub async fn metrics_health(State(state): State<AppState>) -> Json<MetricsHealthResponse> {
    Json(MetricsHealthResponse {
        status: HealthStatus::Ok,
        metrics: "enabled".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        endpoints: MetricsEndpoints {
            prometheus: state.config.metrics.public_url.clone(),
            health: routes::HEALTH.to_string(),
        },
    })
}
