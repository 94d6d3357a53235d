//! # Service Constants
//!
//! Identity of the service and the paths it serves.

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "todolist-backend";

/// Service version reported by the health endpoint
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Task API and observability routes
pub mod routes {
    pub const LIST_TASKS: &str = "/api/tasks";
    pub const ADD_TASK: &str = "/api/add";
    pub const COMPLETE_TASK: &str = "/api/done";
    pub const DELETE_TASK: &str = "/api/delete";
    pub const HEALTH: &str = "/health";
    pub const METRICS_HEALTH: &str = "/api/metrics/health";
    pub const METRICS: &str = "/metrics";
}

/// Form field names accepted by the mutation routes
pub mod form_fields {
    pub const TITLE: &str = "title";
    pub const ID: &str = "id";
}
