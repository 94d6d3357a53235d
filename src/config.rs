//! # Service Configuration
//!
//! Configuration is read from the process environment (optionally seeded from a
//! `.env` file by the binary) through the `config` crate, then validated into
//! typed sections for the database, the task API listener and the metrics
//! listener.

use crate::error::{Result, TodoError};
use serde::Deserialize;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Origins allowed to call the task API from a browser when nothing is configured.
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Flat view of the environment, one field per variable (lowercased by `config`).
#[derive(Debug, Clone, Deserialize)]
struct EnvSettings {
    #[serde(default)]
    todolist_env: Option<String>,
    #[serde(default)]
    app_env: Option<String>,
    #[serde(default)]
    database_url: Option<String>,
    #[serde(default = "default_db_host")]
    db_host: String,
    #[serde(default = "default_db_port")]
    db_port: u16,
    #[serde(default = "default_db_user")]
    db_user: String,
    #[serde(default = "default_db_name")]
    db_name: String,
    #[serde(default)]
    db_password: String,
    #[serde(default = "default_db_sslmode")]
    db_sslmode: String,
    #[serde(default = "default_db_max_connections")]
    db_max_connections: u32,
    #[serde(default = "default_db_acquire_timeout_seconds")]
    db_acquire_timeout_seconds: u64,
    #[serde(default = "default_migrations_dir")]
    migrations_dir: String,
    #[serde(default = "default_bind_address")]
    bind_address: String,
    #[serde(default = "default_request_timeout_ms")]
    request_timeout_ms: u64,
    #[serde(default = "default_cors_allowed_origins")]
    cors_allowed_origins: String,
    #[serde(default = "default_metrics_bind_address")]
    metrics_bind_address: String,
    #[serde(default = "default_metrics_public_url")]
    metrics_public_url: String,
}

fn default_db_host() -> String {
    "localhost".to_string()
}
fn default_db_port() -> u16 {
    5432
}
fn default_db_user() -> String {
    "postgres".to_string()
}
fn default_db_name() -> String {
    "todolist".to_string()
}
fn default_db_sslmode() -> String {
    "disable".to_string()
}
fn default_db_max_connections() -> u32 {
    10
}
fn default_db_acquire_timeout_seconds() -> u64 {
    5
}
fn default_migrations_dir() -> String {
    "migrations".to_string()
}
fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}
fn default_request_timeout_ms() -> u64 {
    30_000
}
fn default_cors_allowed_origins() -> String {
    DEFAULT_CORS_ORIGINS.to_string()
}
fn default_metrics_bind_address() -> String {
    "0.0.0.0:9090".to_string()
}
fn default_metrics_public_url() -> String {
    "http://localhost:9090/metrics".to_string()
}

/// Complete service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub environment: String,
    pub database: DatabaseConfig,
    pub web: WebConfig,
    pub metrics: MetricsConfig,
}

/// PostgreSQL connection parameters
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Full connection URL; takes precedence over the individual parts when set.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub sslmode: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub migrations_dir: PathBuf,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("sslmode", &self.sslmode)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("migrations_dir", &self.migrations_dir)
            .finish()
    }
}

/// Task API listener settings
#[derive(Debug, Clone)]
pub struct WebConfig {
    pub bind_address: SocketAddr,
    pub request_timeout: Duration,
    pub cors_allowed_origins: Vec<String>,
}

/// Observability listener settings
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    pub bind_address: SocketAddr,
    /// Scrape URL advertised by the metrics-health endpoint.
    pub public_url: String,
}

impl ServiceConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        let source = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?;
        Self::from_source(&source)
    }

    /// Build configuration from an already assembled `config` source
    pub fn from_source(source: &config::Config) -> Result<Self> {
        let settings: EnvSettings = source.clone().try_deserialize()?;
        Self::from_settings(settings)
    }

    fn from_settings(settings: EnvSettings) -> Result<Self> {
        let environment = settings
            .todolist_env
            .or(settings.app_env)
            .filter(|env| !env.is_empty())
            .unwrap_or_else(|| "development".to_string());

        if settings.db_max_connections == 0 {
            return Err(TodoError::configuration(
                "DB_MAX_CONNECTIONS must be greater than zero",
            ));
        }

        let cors_allowed_origins: Vec<String> = settings
            .cors_allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            environment,
            database: DatabaseConfig {
                url: settings.database_url.filter(|url| !url.is_empty()),
                host: settings.db_host,
                port: settings.db_port,
                username: settings.db_user,
                password: settings.db_password,
                database: settings.db_name,
                sslmode: settings.db_sslmode,
                max_connections: settings.db_max_connections,
                acquire_timeout: Duration::from_secs(settings.db_acquire_timeout_seconds),
                migrations_dir: PathBuf::from(settings.migrations_dir),
            },
            web: WebConfig {
                bind_address: parse_socket_addr("BIND_ADDRESS", &settings.bind_address)?,
                request_timeout: Duration::from_millis(settings.request_timeout_ms),
                cors_allowed_origins,
            },
            metrics: MetricsConfig {
                bind_address: parse_socket_addr(
                    "METRICS_BIND_ADDRESS",
                    &settings.metrics_bind_address,
                )?,
                public_url: settings.metrics_public_url,
            },
        })
    }
}

fn parse_socket_addr(key: &str, value: &str) -> Result<SocketAddr> {
    value
        .parse()
        .map_err(|e| TodoError::configuration(format!("Invalid {key} '{value}': {e}")))
}
