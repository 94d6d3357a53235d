use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use todolist::metrics::MetricsRegistry;
use todolist::models::{Task, TaskCounts};
use todolist::services::TaskStore;
use todolist::TodoError;

fn store_for(pool: PgPool) -> TaskStore {
    TaskStore::new(pool, Arc::new(MetricsRegistry::new().unwrap()))
}

#[sqlx::test(migrations = "./migrations")]
async fn test_add_assigns_increasing_ids(pool: PgPool) -> sqlx::Result<()> {
    let store = store_for(pool);

    let first = store.add("Buy milk").await.unwrap();
    let second = store.add("Walk dog").await.unwrap();

    assert!(second.id > first.id);
    assert_eq!(first.title, "Buy milk");
    assert!(!first.done);
    assert!(first.created_at.is_some());

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn test_add_rejects_empty_title_without_counting(pool: PgPool) -> sqlx::Result<()> {
    let store = store_for(pool);

    let err = store.add("").await.unwrap_err();
    assert!(matches!(err, TodoError::Validation(_)));
    assert_eq!(store.metrics().task_counters().created, 0);
    assert!(store.list_all().await.unwrap().is_empty());

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_reflects_adds_minus_deletes_in_id_order(pool: PgPool) -> sqlx::Result<()> {
    let store = store_for(pool);

    let mut ids = Vec::new();
    for title in ["one", "two", "three", "four", "five"] {
        ids.push(store.add(title).await.unwrap().id);
    }
    store.delete(ids[1]).await.unwrap();
    store.delete(ids[3]).await.unwrap();

    let listed: Vec<i32> = store.list_all().await.unwrap().iter().map(|t| t.id).collect();
    assert_eq!(listed, vec![ids[0], ids[2], ids[4]]);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn test_complete_is_idempotent(pool: PgPool) -> sqlx::Result<()> {
    let store = store_for(pool);
    let task = store.add("Buy milk").await.unwrap();

    store.complete(task.id).await.unwrap();
    store.complete(task.id).await.unwrap();

    let tasks = store.list_all().await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert!(tasks[0].done);
    assert_eq!(store.metrics().task_counters().completed, 2);
    assert_eq!(
        store.metrics().task_gauges(),
        TaskCounts {
            total: 1,
            active: 0,
            completed: 1
        }
    );

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_twice_succeeds(pool: PgPool) -> sqlx::Result<()> {
    let store = store_for(pool);
    let task = store.add("Buy milk").await.unwrap();

    store.delete(task.id).await.unwrap();
    store.delete(task.id).await.unwrap();

    assert!(store.list_all().await.unwrap().is_empty());
    assert_eq!(store.metrics().task_counters().deleted, 2);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_id_still_counts(pool: PgPool) -> sqlx::Result<()> {
    let store = store_for(pool);

    store.complete(424_242).await.unwrap();
    store.delete(424_242).await.unwrap();

    let counters = store.metrics().task_counters();
    assert_eq!(counters.completed, 1);
    assert_eq!(counters.deleted, 1);
    assert_eq!(store.metrics().task_gauges(), TaskCounts::default());

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn test_gauges_track_table_after_each_mutation(pool: PgPool) -> sqlx::Result<()> {
    let store = store_for(pool);

    let a = store.add("a").await.unwrap();
    let _b = store.add("b").await.unwrap();
    let c = store.add("c").await.unwrap();
    store.complete(a.id).await.unwrap();
    store.delete(c.id).await.unwrap();

    let gauges = store.metrics().task_gauges();
    assert!(gauges.is_consistent());
    assert_eq!(
        gauges,
        TaskCounts {
            total: 2,
            active: 1,
            completed: 1
        }
    );
    assert_eq!(store.resync_metrics().await.unwrap(), gauges);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn test_resync_repairs_externally_changed_table(pool: PgPool) -> sqlx::Result<()> {
    let store = store_for(pool.clone());
    store.add("tracked").await.unwrap();

    sqlx::query("INSERT INTO tasks (title, done) VALUES ('external', TRUE)")
        .execute(&pool)
        .await?;

    let counts = store.resync_metrics().await.unwrap();
    assert_eq!(
        counts,
        TaskCounts {
            total: 2,
            active: 1,
            completed: 1
        }
    );
    assert_eq!(store.metrics().task_gauges(), counts);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn test_failed_resync_keeps_mutation_and_previous_gauges(pool: PgPool) -> sqlx::Result<()> {
    let metrics = Arc::new(MetricsRegistry::new().unwrap());
    let owner = TaskStore::new(pool.clone(), Arc::clone(&metrics));
    let first = owner.add("first").await.unwrap();
    let second = owner.add("second").await.unwrap();
    let gauges_before = metrics.task_gauges();
    assert_eq!(
        gauges_before,
        TaskCounts {
            total: 2,
            active: 2,
            completed: 0
        }
    );

    // May update and delete by id, but cannot read `done`, so the counts fail.
    let role = format!("todolist_writer_{}", uuid::Uuid::new_v4().simple());
    sqlx::raw_sql(&format!(
        "CREATE ROLE {role} LOGIN PASSWORD 'writer'; \
         GRANT SELECT (id), UPDATE (done), DELETE ON tasks TO {role};"
    ))
    .execute(&pool)
    .await?;

    let options = (*pool.connect_options())
        .clone()
        .username(&role)
        .password("writer");
    let writer_pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    let writer = TaskStore::new(writer_pool.clone(), Arc::clone(&metrics));

    assert!(writer.resync_metrics().await.is_err());

    writer.complete(first.id).await.unwrap();
    writer.delete(second.id).await.unwrap();

    let counters = metrics.task_counters();
    assert_eq!(
        (counters.created, counters.completed, counters.deleted),
        (2, 1, 1)
    );
    assert_eq!(metrics.task_gauges(), gauges_before);

    assert_eq!(
        Task::counts(&pool).await?,
        TaskCounts {
            total: 1,
            active: 0,
            completed: 1
        }
    );

    writer_pool.close().await;
    sqlx::raw_sql(&format!(
        "REVOKE ALL ON tasks FROM {role}; DROP ROLE {role};"
    ))
    .execute(&pool)
    .await?;

    Ok(())
}
