//! # Health Checker
//!
//! Stateless liveness probe. Each call pings the store and folds the result
//! into an overall status: `ok` when the database answers, `degraded` when it
//! does not. Degradation is reported in the body only; the HTTP layer always
//! answers 200.

use crate::constants::{SERVICE_NAME, SERVICE_VERSION};
use crate::services::task_store::TaskStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Overall service status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Degraded,
}

/// Status of a single dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthComponents {
    pub database: ComponentStatus,
}

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: String,
    pub service: String,
    pub timestamp: String,
    pub components: HealthComponents,
}

impl HealthReport {
    /// Compose a report from the individual component results
    pub fn from_components(components: HealthComponents) -> Self {
        let status = match components.database {
            ComponentStatus::Ok => HealthStatus::Ok,
            ComponentStatus::Error => HealthStatus::Degraded,
        };

        Self {
            status,
            version: SERVICE_VERSION.to_string(),
            service: SERVICE_NAME.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            components,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HealthChecker {
    store: TaskStore,
}

impl HealthChecker {
    pub fn new(store: TaskStore) -> Self {
        Self { store }
    }

    pub async fn check(&self) -> HealthReport {
        let database = match self.store.ping().await {
            Ok(()) => {
                debug!("Database health check passed");
                ComponentStatus::Ok
            }
            Err(e) => {
                error!(component = "database", error = %e, "Database health check failed");
                ComponentStatus::Error
            }
        };

        HealthReport::from_components(HealthComponents { database })
    }
}
