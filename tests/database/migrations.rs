use sqlx::PgPool;
use todolist::database::{DatabaseMigrations, MigrationOutcome};

use crate::common::migrations_dir;

#[sqlx::test(migrations = false)]
async fn test_migrations_apply_then_report_current(pool: PgPool) -> sqlx::Result<()> {
    let runner = DatabaseMigrations::new(migrations_dir());
    let migrator = runner.migrator().await.expect("migrations should resolve");
    let expected_count = migrator.iter().count();
    let expected_latest = migrator.iter().map(|m| m.version).max();

    let first = runner.run_pending(&pool).await.expect("first run should apply");
    match first {
        MigrationOutcome::Applied { count, latest } => {
            assert_eq!(count, expected_count);
            assert_eq!(Some(latest), expected_latest);
        }
        MigrationOutcome::AlreadyCurrent => panic!("fresh database should need migrations"),
    }

    let second = runner.run_pending(&pool).await.expect("second run should succeed");
    assert_eq!(second, MigrationOutcome::AlreadyCurrent);

    let (exists,): (bool,) = sqlx::query_as("SELECT to_regclass('public.tasks') IS NOT NULL")
        .fetch_one(&pool)
        .await?;
    assert!(exists);

    let (recorded,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(&pool)
        .await?;
    assert_eq!(recorded, expected_count as i64);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn test_sqlx_test_schema_is_already_current(pool: PgPool) -> sqlx::Result<()> {
    let outcome = DatabaseMigrations::new(migrations_dir())
        .run_pending(&pool)
        .await
        .expect("run should succeed");
    assert_eq!(outcome, MigrationOutcome::AlreadyCurrent);
    Ok(())
}

#[sqlx::test(migrations = false)]
async fn test_schema_rejects_empty_title(pool: PgPool) -> sqlx::Result<()> {
    DatabaseMigrations::new(migrations_dir())
        .run_pending(&pool)
        .await
        .expect("migrations should apply");

    let result = sqlx::query("INSERT INTO tasks (title) VALUES ('')")
        .execute(&pool)
        .await;
    assert!(result.is_err());

    Ok(())
}

#[sqlx::test(migrations = false)]
async fn test_missing_migrations_directory_fails(pool: PgPool) -> sqlx::Result<()> {
    let dir = tempfile::tempdir().expect("tempdir");
    let runner = DatabaseMigrations::new(dir.path().join("does-not-exist"));

    assert!(runner.run_pending(&pool).await.is_err());
    Ok(())
}
