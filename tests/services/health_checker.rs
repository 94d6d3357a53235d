use sqlx::PgPool;
use std::sync::Arc;
use todolist::metrics::MetricsRegistry;
use todolist::services::{ComponentStatus, HealthChecker, HealthStatus, TaskStore};

use crate::common::unreachable_pool;

#[sqlx::test(migrations = "./migrations")]
async fn test_reachable_database_is_ok(pool: PgPool) -> sqlx::Result<()> {
    let store = TaskStore::new(pool, Arc::new(MetricsRegistry::new().unwrap()));
    let report = HealthChecker::new(store).check().await;

    assert_eq!(report.status, HealthStatus::Ok);
    assert_eq!(report.components.database, ComponentStatus::Ok);

    Ok(())
}

#[tokio::test]
async fn test_unreachable_database_is_degraded() {
    let store = TaskStore::new(unreachable_pool(), Arc::new(MetricsRegistry::new().unwrap()));
    let report = HealthChecker::new(store).check().await;

    assert_eq!(report.status, HealthStatus::Degraded);
    assert_eq!(report.components.database, ComponentStatus::Error);
}
