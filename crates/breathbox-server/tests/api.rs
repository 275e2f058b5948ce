//! Accountability API tests, run in-process with `tower::ServiceExt`.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use breathbox_core::LedgerStore;
use breathbox_server::{router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app(dir: &tempfile::TempDir) -> Router {
    let store = LedgerStore::open(dir.path().join("ledger.json"));
    router(AppState::new(store), None)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_responds_ok() {
    let dir = tempfile::tempdir().unwrap();
    let response = app(&dir).oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn complete_marks_the_period_and_shows_in_stats() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/complete/Andre",
            json!({ "timePeriod": "midday", "localHour": 12 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let ack = body_json(response).await;
    assert_eq!(ack["success"], true);
    assert_eq!(ack["timePeriod"], "midday");
    assert_eq!(ack["data"]["Andre"]["midday"], true);
    assert_eq!(ack["data"]["Felipe"]["midday"], false);

    let response = app.oneshot(get("/api/stats")).await.unwrap();
    let stats = body_json(response).await;
    assert_eq!(stats["Andre"]["midday"], true);
    assert_eq!(stats["Andre"]["morning"], false);
}

#[tokio::test]
async fn unknown_person_gets_400_without_touching_state() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/complete/Carol",
            json!({ "timePeriod": "morning" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let stats = body_json(app.oneshot(get("/api/stats")).await.unwrap()).await;
    for person in ["Andre", "Felipe"] {
        for period in ["morning", "midday", "evening"] {
            assert_eq!(stats[person][period], false, "{person}/{period}");
        }
    }
}

#[tokio::test]
async fn person_names_are_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);

    let response = app
        .oneshot(post_json(
            "/api/complete/felipe",
            json!({ "timePeriod": "evening" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["Felipe"]["evening"], true);
}

#[tokio::test]
async fn period_is_inferred_from_the_local_hour() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);

    let response = app
        .oneshot(post_json("/api/complete/Andre", json!({ "localHour": 20 })))
        .await
        .unwrap();
    let ack = body_json(response).await;
    assert_eq!(ack["timePeriod"], "evening");
    assert_eq!(ack["localHour"], 20);
    assert_eq!(ack["data"]["Andre"]["evening"], true);
}

#[tokio::test]
async fn reset_daily_clears_the_table() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);

    app.clone()
        .oneshot(post_json(
            "/api/complete/Andre",
            json!({ "timePeriod": "morning" }),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(post_json("/api/reset-daily", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);

    let stats = body_json(app.oneshot(get("/api/stats")).await.unwrap()).await;
    assert_eq!(stats["Andre"]["morning"], false);
}
