//! Route table and handlers for the accountability API.

use std::path::Path;

use axum::extract::{Path as UrlPath, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use breathbox_core::{DayPeriod, Ledger, Person};
use chrono::{Local, Timelike};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;

use crate::state::AppState;

/// Build the application router. When `public_dir` is given, anything
/// outside the API falls back to static assets, with `index.html` for
/// unknown paths.
pub fn router(state: AppState, public_dir: Option<&Path>) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .route("/api/stats", get(stats))
        .route("/api/complete/{name}", post(complete))
        .route("/api/reset-daily", post(reset_daily));

    if let Some(dir) = public_dir {
        let assets = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
        router = router.fallback_service(assets);
    }

    router.layer(CorsLayer::permissive()).with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn stats(State(state): State<AppState>) -> Json<Ledger> {
    Json(state.store.lock().await.stats())
}

#[derive(Deserialize, Default)]
struct CompleteBody {
    /// Explicit period; wins over `localHour` when both are present.
    #[serde(rename = "timePeriod")]
    time_period: Option<DayPeriod>,
    /// Client's local hour, used to bucket when no period is given.
    #[serde(rename = "localHour")]
    local_hour: Option<u32>,
}

async fn complete(
    State(state): State<AppState>,
    UrlPath(name): UrlPath<String>,
    body: Option<Json<CompleteBody>>,
) -> Response {
    // Unknown names are rejected before any state is touched.
    let person: Person = match name.parse() {
        Ok(person) => person,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let local_hour = body.local_hour.unwrap_or_else(|| Local::now().hour());
    let period = body
        .time_period
        .unwrap_or_else(|| DayPeriod::from_hour(local_hour));

    let mut store = state.store.lock().await;
    match store.record(person, period) {
        Ok(data) => {
            info!("recorded completion: {person} / {period}");
            Json(json!({
                "success": true,
                "timePeriod": period,
                "localHour": local_hour,
                "data": data,
            }))
            .into_response()
        }
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

async fn reset_daily(State(state): State<AppState>) -> Response {
    let mut store = state.store.lock().await;
    match store.reset_daily() {
        Ok(()) => {
            info!("daily reset");
            Json(json!({ "success": true })).into_response()
        }
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
