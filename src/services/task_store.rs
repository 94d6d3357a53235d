//! # Task Store
//!
//! The single gateway to the `tasks` relation. Every successful mutation
//! bumps its lifetime counter and then resynchronizes the gauges from the
//! table before control returns to the caller. A failed resync is logged and
//! swallowed: the mutation already committed, and the next resync repairs the
//! gauges.
//!
//! Complete and delete cannot tell an unknown id from a real change without an
//! extra existence check, so their counters increment whenever the statement
//! succeeds, including zero-row updates.

use crate::database::connection;
use crate::error::{Result, TodoError};
use crate::metrics::MetricsRegistry;
use crate::models::{Task, TaskCounts};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct TaskStore {
    pool: PgPool,
    metrics: Arc<MetricsRegistry>,
}

impl TaskStore {
    pub fn new(pool: PgPool, metrics: Arc<MetricsRegistry>) -> Self {
        Self { pool, metrics }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }

    /// Create a task. The caller has already rejected empty titles.
    pub async fn add(&self, title: &str) -> Result<Task> {
        if title.is_empty() {
            return Err(TodoError::validation("Title is required"));
        }

        let task = Task::create(&self.pool, title).await?;
        info!(task_id = task.id, "Task created");

        self.metrics.record_created();
        self.resync_after_mutation("add").await;

        Ok(task)
    }

    pub async fn list_all(&self) -> Result<Vec<Task>> {
        let tasks = Task::list_all(&self.pool).await?;
        debug!(count = tasks.len(), "Listed tasks");
        Ok(tasks)
    }

    /// Mark a task done. Unknown ids are a successful no-op.
    pub async fn complete(&self, id: i32) -> Result<()> {
        let rows = Task::mark_done(&self.pool, id).await?;
        info!(task_id = id, rows_affected = rows, "Task completed");

        self.metrics.record_completed();
        self.resync_after_mutation("complete").await;

        Ok(())
    }

    /// Delete a task. Unknown ids are a successful no-op.
    pub async fn delete(&self, id: i32) -> Result<()> {
        let rows = Task::delete(&self.pool, id).await?;
        info!(task_id = id, rows_affected = rows, "Task deleted");

        self.metrics.record_deleted();
        self.resync_after_mutation("delete").await;

        Ok(())
    }

    /// Recompute all gauges from the table
    pub async fn resync_metrics(&self) -> Result<TaskCounts> {
        let counts = Task::counts(&self.pool).await?;
        self.metrics.set_task_gauges(counts);

        debug!(
            total = counts.total,
            active = counts.active,
            completed = counts.completed,
            "Task gauges resynchronized"
        );
        Ok(counts)
    }

    pub async fn ping(&self) -> Result<()> {
        connection::ping(&self.pool).await
    }

    async fn resync_after_mutation(&self, operation: &'static str) {
        if let Err(e) = self.resync_metrics().await {
            warn!(operation, error = %e, "Failed to resynchronize task gauges");
        }
    }
}
