#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Todo List Backend
//!
//! HTTP service for a shared task list backed by PostgreSQL.
//!
//! ## Overview
//!
//! Tasks are created, listed, completed and deleted through a small
//! form-encoded JSON API. Every mutation updates Prometheus counters and
//! resynchronizes the task gauges from the table, so a scrape always reflects
//! the committed state. A second listener serves the metrics.
//!
//! ## Module Organization
//!
//! - [`models`] - The `tasks` relation and its queries
//! - [`services`] - Task store and health checker
//! - [`metrics`] - Prometheus registry for task and HTTP metrics
//! - [`database`] - Connection pool and migration runner
//! - [`web`] - Axum routers, handlers and middleware
//! - [`config`] - Environment-driven configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sqlx::PgPool;
//! use todolist::metrics::MetricsRegistry;
//! use todolist::services::TaskStore;
//!
//! # async fn example(pool: PgPool) -> todolist::Result<()> {
//! let metrics = Arc::new(MetricsRegistry::new()?);
//! let store = TaskStore::new(pool, metrics);
//!
//! let task = store.add("Buy milk").await?;
//! store.complete(task.id).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! Database tests use SQLx native testing with a fresh database per test:
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # All tests, needs DATABASE_URL
//! ```

pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod web;

pub use config::{DatabaseConfig, MetricsConfig, ServiceConfig, WebConfig};
pub use error::{Result, TodoError};
pub use metrics::{MetricsRegistry, TaskCounters};
pub use models::{Task, TaskCounts};
pub use services::{HealthChecker, HealthReport, HealthStatus, TaskStore};
