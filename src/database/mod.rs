//! # Database Operations
//!
//! PostgreSQL access for the todolist service.
//!
//! - [`connection`] - Pool creation and the reachability probe
//! - [`migrations`] - Versioned schema migrations run once at startup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use todolist::config::ServiceConfig;
//! use todolist::database::{DatabaseConnection, DatabaseMigrations};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServiceConfig::from_env()?;
//! let db = DatabaseConnection::connect(&config.database).await?;
//!
//! let outcome = DatabaseMigrations::new(&config.database.migrations_dir)
//!     .run_pending(db.pool())
//!     .await?;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod migrations;

pub use connection::{connect_options, ping, pool_options, DatabaseConnection};
pub use migrations::{DatabaseMigrations, MigrationOutcome};
