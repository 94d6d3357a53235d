pub mod health_checker;
pub mod task_store;

pub use health_checker::{
    ComponentStatus, HealthChecker, HealthComponents, HealthReport, HealthStatus,
};
pub use task_store::TaskStore;
