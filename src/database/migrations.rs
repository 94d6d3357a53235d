//! # Database Migration System
//!
//! Versioned schema migrations applied once at startup, before any listener
//! opens.
//!
//! Migrations live in a directory (default `migrations/`) named
//! `<VERSION>_<description>.sql` and are run by `sqlx::migrate::Migrator`,
//! which records them in `_sqlx_migrations`, verifies checksums of already
//! applied files and holds an advisory lock for the whole run. The same
//! directory backs `#[sqlx::test(migrations = "./migrations")]`, so tests and
//! production share one tracking table.

use crate::error::{Result, TodoError};
use sqlx::migrate::{Migrate, MigrateError, Migrator};
use sqlx::PgPool;
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

/// Result of a successful migration run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// At least one pending migration was applied
    Applied { count: usize, latest: i64 },
    /// Every discovered migration had already been applied
    AlreadyCurrent,
}

impl fmt::Display for MigrationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied { count, latest } => {
                write!(f, "applied {count} migration(s), schema now at {latest}")
            }
            Self::AlreadyCurrent => write!(f, "schema already current"),
        }
    }
}

/// Applies pending migrations from a directory.
#[derive(Debug, Clone)]
pub struct DatabaseMigrations {
    migrations_dir: PathBuf,
}

impl DatabaseMigrations {
    pub fn new(migrations_dir: impl Into<PathBuf>) -> Self {
        Self {
            migrations_dir: migrations_dir.into(),
        }
    }

    /// Resolve the migration files in the configured directory
    pub async fn migrator(&self) -> Result<Migrator> {
        Migrator::new(self.migrations_dir.clone())
            .await
            .map_err(|e| self.migration_error(e))
    }

    /// Apply every migration not yet recorded, in version order
    pub async fn run_pending(&self, pool: &PgPool) -> Result<MigrationOutcome> {
        let migrator = self.migrator().await?;
        debug!(
            dir = %self.migrations_dir.display(),
            known = migrator.iter().count(),
            "Resolved migrations"
        );

        let before = Self::applied_versions(pool).await?;
        migrator.run(pool).await.map_err(|e| self.migration_error(e))?;
        let after = Self::applied_versions(pool).await?;

        let mut applied: Vec<i64> = after.difference(&before).copied().collect();
        applied.sort_unstable();

        Ok(match applied.last() {
            Some(&latest) => {
                info!(count = applied.len(), latest, "Applied migrations");
                MigrationOutcome::Applied {
                    count: applied.len(),
                    latest,
                }
            }
            None => MigrationOutcome::AlreadyCurrent,
        })
    }

    async fn applied_versions(pool: &PgPool) -> Result<HashSet<i64>> {
        let mut conn = pool.acquire().await?;
        conn.ensure_migrations_table()
            .await
            .map_err(|e| TodoError::migration(e.to_string()))?;

        let applied = conn
            .list_applied_migrations()
            .await
            .map_err(|e| TodoError::migration(e.to_string()))?;

        Ok(applied.into_iter().map(|m| m.version).collect())
    }

    fn migration_error(&self, err: MigrateError) -> TodoError {
        TodoError::migration(format!("{}: {err}", self.migrations_dir.display()))
    }
}
