use crate::config::DatabaseConfig;
use crate::error::{Result, TodoError};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::{PgPool, Row};
use std::str::FromStr;
use tracing::{debug, info};

/// Owns the PostgreSQL pool shared by the task store and the health checker.
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Open a pool and verify the server answers before returning
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = connect_options(config)?;

        debug!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            max_connections = config.max_connections,
            acquire_timeout_ms = config.acquire_timeout.as_millis() as u64,
            "Creating database pool"
        );

        let pool = pool_options(config).connect_with(options).await?;
        let connection = Self { pool };
        connection.health_check().await?;

        info!(
            pool_size = connection.pool.size(),
            "Successfully connected to PostgreSQL"
        );
        Ok(connection)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn into_pool(self) -> PgPool {
        self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        ping(&self.pool).await
    }
}

/// Round-trip a trivial query to prove the store is reachable
pub async fn ping(pool: &PgPool) -> Result<()> {
    let row = sqlx::query("SELECT 1 AS health").fetch_one(pool).await?;
    let health: i32 = row.try_get("health")?;
    if health == 1 {
        Ok(())
    } else {
        Err(TodoError::Persistence(sqlx::Error::Protocol(format!(
            "unexpected health probe result {health}"
        ))))
    }
}

/// Pool sizing and timeouts shared by every pool the service opens
pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .test_before_acquire(true)
}

/// Build connection options from the explicit URL or from the individual parts
pub fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions> {
    if let Some(url) = &config.url {
        return PgConnectOptions::from_str(url)
            .map_err(|e| TodoError::configuration(format!("Invalid DATABASE_URL: {e}")));
    }

    let ssl_mode = PgSslMode::from_str(&config.sslmode).map_err(|e| {
        TodoError::configuration(format!("Invalid DB_SSLMODE '{}': {e}", config.sslmode))
    })?;

    let mut options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.username)
        .database(&config.database)
        .ssl_mode(ssl_mode);

    if !config.password.is_empty() {
        options = options.password(&config.password);
    }

    Ok(options)
}
