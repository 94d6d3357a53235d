//! # Task Model
//!
//! The only persisted entity of the service.
//!
//! ## Database Schema
//!
//! Maps to the `tasks` table:
//! ```sql
//! CREATE TABLE tasks (
//!   id SERIAL PRIMARY KEY,
//!   title TEXT NOT NULL CHECK (title <> ''),
//!   done BOOLEAN NOT NULL DEFAULT FALSE,
//!   created_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
//! );
//! ```
//!
//! Ids come from the sequence, so they strictly increase in creation order.
//! A task can only move from `done = false` to `done = true`, and deletion is
//! a hard delete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

/// A persisted task row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub done: bool,
    /// Populated by the column default; `None` only if the store failed to set it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Aggregate task counts used to recompute the gauges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub total: i64,
    pub active: i64,
    pub completed: i64,
}

impl TaskCounts {
    /// Whether every task is accounted for as either active or completed
    pub fn is_consistent(&self) -> bool {
        self.total == self.active + self.completed
    }
}

impl Task {
    /// Insert a task and return the row as stored
    pub async fn create(pool: &PgPool, title: &str) -> Result<Task, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title)
            VALUES ($1)
            RETURNING id, title, done, created_at
            "#,
        )
        .bind(title)
        .fetch_one(pool)
        .await
    }

    /// List every task ordered by id
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, done, created_at
            FROM tasks
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Mark a task done, returning the number of rows touched (0 for unknown ids)
    pub async fn mark_done(pool: &PgPool, id: i32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE tasks SET done = TRUE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Delete a task, returning the number of rows removed (0 for unknown ids)
    pub async fn delete(pool: &PgPool, id: i32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Count all, active and completed tasks from a single snapshot
    ///
    /// The three aggregates run in one read-only REPEATABLE READ transaction so
    /// concurrent writers cannot make them disagree with each other.
    pub async fn counts(pool: &PgPool) -> Result<TaskCounts, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
            .fetch_one(&mut *tx)
            .await?;
        let active: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE done = FALSE")
            .fetch_one(&mut *tx)
            .await?;
        let completed: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE done = TRUE")
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(TaskCounts {
            total,
            active,
            completed,
        })
    }
}
