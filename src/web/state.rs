//! # Web API Application State
//!
//! Shared state handed to every request handler: the task store, the health
//! checker, the metrics registry and the service configuration.

use crate::config::ServiceConfig;
use crate::metrics::MetricsRegistry;
use crate::services::{HealthChecker, TaskStore};
use std::sync::Arc;
use tracing::info;

/// Shared application state for the web API
///
/// Cheap to clone; every field is reference counted or wraps a pool handle.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub store: TaskStore,
    pub health: HealthChecker,
    pub metrics: Arc<MetricsRegistry>,
}

impl AppState {
    /// Build state around an existing store; the health checker shares its pool
    pub fn new(config: Arc<ServiceConfig>, store: TaskStore) -> Self {
        let metrics = Arc::clone(store.metrics());
        let health = HealthChecker::new(store.clone());

        info!(
            bind_address = %config.web.bind_address,
            allowed_origins = config.web.cors_allowed_origins.len(),
            "Web API application state created"
        );

        Self {
            config,
            store,
            health,
            metrics,
        }
    }
}
