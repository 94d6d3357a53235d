//! # Metrics Registry
//!
//! Process-wide Prometheus metrics for the todolist service.
//!
//! - **Counters** are lifetime totals of successful store mutations. They only
//!   ever grow and reset with the process.
//! - **Gauges** mirror the current contents of the `tasks` table. They are
//!   never adjusted incrementally: every resync overwrites all three from a
//!   fresh aggregate snapshot, so any drift heals on the next mutation.
//! - **HTTP metrics** count and time every request served by the task API.
//!
//! The registry is owned explicitly (`Arc<MetricsRegistry>`) by the store, the
//! router state and the metrics listener.

use crate::error::{Result, TodoError};
use crate::models::TaskCounts;
use parking_lot::RwLock;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::time::Duration;

/// Content type of the Prometheus text exposition format
pub const METRICS_CONTENT_TYPE: &str = prometheus::TEXT_FORMAT;

const HTTP_DURATION_BUCKETS: &[f64] = &[0.1, 0.3, 0.5, 1.0, 2.0, 5.0];

/// Lifetime mutation totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounters {
    pub created: u64,
    pub completed: u64,
    pub deleted: u64,
}

pub struct MetricsRegistry {
    registry: Registry,
    tasks_created: IntCounter,
    tasks_completed: IntCounter,
    tasks_deleted: IntCounter,
    tasks_total: IntGauge,
    tasks_active: IntGauge,
    tasks_completed_now: IntGauge,
    http_requests_total: IntCounterVec,
    http_request_duration: HistogramVec,
    /// Last applied gauge snapshot; the lock also fences rendering.
    task_gauges: RwLock<TaskCounts>,
}

impl std::fmt::Debug for MetricsRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsRegistry")
            .field("counters", &self.task_counters())
            .field("gauges", &self.task_gauges())
            .finish_non_exhaustive()
    }
}

impl MetricsRegistry {
    /// Create a registry with every series registered and zeroed
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let tasks_created = IntCounter::new(
            "todolist_tasks_created_total",
            "Total number of tasks created",
        )?;
        let tasks_completed = IntCounter::new(
            "todolist_tasks_completed_total",
            "Total number of tasks completed",
        )?;
        let tasks_deleted = IntCounter::new(
            "todolist_tasks_deleted_total",
            "Total number of tasks deleted",
        )?;

        let tasks_total = IntGauge::new("todolist_tasks_total", "Current total number of tasks")?;
        let tasks_active = IntGauge::new(
            "todolist_tasks_active",
            "Current number of active (not completed) tasks",
        )?;
        let tasks_completed_now = IntGauge::new(
            "todolist_tasks_completed",
            "Current number of completed tasks",
        )?;

        let http_requests_total = IntCounterVec::new(
            Opts::new("todolist_http_requests_total", "Total number of HTTP requests"),
            &["method", "endpoint", "status"],
        )?;
        let http_request_duration = HistogramVec::new(
            HistogramOpts::new(
                "todolist_http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(HTTP_DURATION_BUCKETS.to_vec()),
            &["method", "endpoint"],
        )?;

        registry.register(Box::new(tasks_created.clone()))?;
        registry.register(Box::new(tasks_completed.clone()))?;
        registry.register(Box::new(tasks_deleted.clone()))?;
        registry.register(Box::new(tasks_total.clone()))?;
        registry.register(Box::new(tasks_active.clone()))?;
        registry.register(Box::new(tasks_completed_now.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration.clone()))?;

        Ok(Self {
            registry,
            tasks_created,
            tasks_completed,
            tasks_deleted,
            tasks_total,
            tasks_active,
            tasks_completed_now,
            http_requests_total,
            http_request_duration,
            task_gauges: RwLock::new(TaskCounts::default()),
        })
    }

    pub fn record_created(&self) {
        self.tasks_created.inc();
    }

    pub fn record_completed(&self) {
        self.tasks_completed.inc();
    }

    pub fn record_deleted(&self) {
        self.tasks_deleted.inc();
    }

    /// Overwrite all three gauges from one aggregate snapshot
    ///
    /// Concurrent callers race; the last one to take the lock wins.
    pub fn set_task_gauges(&self, counts: TaskCounts) {
        let mut current = self.task_gauges.write();
        self.tasks_total.set(counts.total);
        self.tasks_active.set(counts.active);
        self.tasks_completed_now.set(counts.completed);
        *current = counts;
    }

    pub fn task_gauges(&self) -> TaskCounts {
        *self.task_gauges.read()
    }

    pub fn task_counters(&self) -> TaskCounters {
        TaskCounters {
            created: self.tasks_created.get(),
            completed: self.tasks_completed.get(),
            deleted: self.tasks_deleted.get(),
        }
    }

    /// Record one served HTTP request
    pub fn observe_http_request(&self, method: &str, endpoint: &str, status: u16, elapsed: Duration) {
        let status = status.to_string();
        self.http_requests_total
            .with_label_values(&[method, endpoint, status.as_str()])
            .inc();
        self.http_request_duration
            .with_label_values(&[method, endpoint])
            .observe(elapsed.as_secs_f64());
    }

    /// Render every registered series in the Prometheus text format
    pub fn render(&self) -> Result<String> {
        let families = {
            let _gauges = self.task_gauges.read();
            self.registry.gather()
        };

        let mut buffer = Vec::new();
        TextEncoder::new().encode(&families, &mut buffer)?;

        String::from_utf8(buffer)
            .map_err(|e| TodoError::Metrics(prometheus::Error::Msg(e.to_string())))
    }
}
