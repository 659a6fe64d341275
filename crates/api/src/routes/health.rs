use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::ApiState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct VersionResponse {
    name: &'static str,
    version: &'static str,
}

/// Server clock, so clients refreshing join buttons can correct for skew.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ServerTimeResponse {
    now: DateTime<Utc>,
    reject_overlapping_slots: bool,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn server_time(State(state): State<Arc<ApiState>>) -> Json<ServerTimeResponse> {
    Json(ServerTimeResponse {
        now: state.clock.now(),
        reject_overlapping_slots: state.slots.overlap_policy() == codeconnect_core::OverlapPolicy::Reject,
    })
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
        .route("/api/time", get(server_time))
}
