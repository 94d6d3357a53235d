use thiserror::Error;

/// Errors produced by the todolist core.
#[derive(Debug, Error)]
pub enum TodoError {
    /// Bad or missing input, rejected before the store is touched.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The store was unreachable or a query failed.
    #[error("{0}")]
    Persistence(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    /// Store unreachable at boot or schema migration failure.
    #[error("Startup aborted: {0}")]
    StartupFatal(String),
}

impl TodoError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn migration(message: impl Into<String>) -> Self {
        Self::Migration(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn startup_fatal(message: impl Into<String>) -> Self {
        Self::StartupFatal(message.into())
    }
}

impl From<config::ConfigError> for TodoError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TodoError>;
