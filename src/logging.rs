//! # Structured Logging Module
//!
//! Environment-aware structured logging for the task API and the metrics
//! listener. Console output is human readable by default; `LOG_FORMAT=json`
//! switches to one JSON object per line for log shippers.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging for the given environment
///
/// `RUST_LOG` wins over the environment-derived default level. Safe to call
/// more than once.
pub fn init_structured_logging(environment: &str) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let log_level = get_log_level(environment);
        let json_output = use_json_format(std::env::var("LOG_FORMAT").ok().as_deref());

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

        let console_layer = if json_output {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .json()
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(true)
                .boxed()
        };

        let subscriber = tracing_subscriber::registry()
            .with(console_layer)
            .with(filter);

        // Tests and embedding hosts may have installed a subscriber already.
        if subscriber.try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized");
        }

        tracing::info!(
            pid = std::process::id(),
            environment = %environment,
            level = %log_level,
            json = json_output,
            "Structured logging initialized"
        );
    });
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> String {
    match environment {
        "test" | "development" => "debug".to_string(),
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

fn use_json_format(value: Option<&str>) -> bool {
    value.is_some_and(|format| format.eq_ignore_ascii_case("json"))
}
