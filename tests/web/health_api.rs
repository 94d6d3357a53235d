use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use sqlx::PgPool;
use tower::ServiceExt;

use crate::common::{body_json, get, test_app, unreachable_pool};

#[sqlx::test(migrations = "./migrations")]
async fn test_health_ok_with_database(pool: PgPool) -> sqlx::Result<()> {
    let app = test_app(pool);

    let response = app.router.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "todolist-backend");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["components"]["database"], "ok");
    assert!(body["timestamp"].as_str().is_some());

    Ok(())
}

#[tokio::test]
async fn test_health_degraded_still_returns_200() {
    let app = test_app(unreachable_pool());

    let response = app.router.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["components"]["database"], "error");
}

#[tokio::test]
async fn test_metrics_health_describes_endpoints() {
    let app = test_app(unreachable_pool());

    let response = app.router.oneshot(get("/api/metrics/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["metrics"], "enabled");
    assert_eq!(
        body["endpoints"]["prometheus"],
        "http://metrics.test:9090/metrics"
    );
    assert_eq!(body["endpoints"]["health"], "/health");
}

#[tokio::test]
async fn test_health_routes_answer_any_verb() {
    let app = test_app(unreachable_pool());

    for method in [Method::POST, Method::PUT, Method::DELETE] {
        for route in ["/health", "/api/metrics/health"] {
            let request = Request::builder()
                .method(method.clone())
                .uri(route)
                .body(Body::empty())
                .unwrap();
            let response = app.router.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{method} {route}");
        }
    }
}
