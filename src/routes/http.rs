// GET handlers. Snapshot endpoints always answer 200 with a well-formed body.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::AppState;
use crate::collectors::SystemCollector;
use crate::models::{ContainerSnapshot, NetworkSnapshot, StorageSnapshot, SystemSnapshot};
use crate::version::{NAME, VERSION};

/// Runs a blocking collector off the async runtime; a panicked task answers `fallback`.
async fn collect_blocking<T, F>(collector: &'static str, f: F, fallback: T) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap_or_else(|e| {
        tracing::warn!(collector, error = %e, "collector task failed");
        fallback
    })
}

/// GET /api/system: blocks for the CPU sampling window.
pub(super) async fn system_handler(State(state): State<AppState>) -> Json<SystemSnapshot> {
    let collector = state.system.clone();
    Json(
        collect_blocking(
            "system",
            move || collector.collect(),
            SystemCollector::baseline(),
        )
        .await,
    )
}

/// GET /api/storage
pub(super) async fn storage_handler(State(state): State<AppState>) -> Json<StorageSnapshot> {
    let collector = state.storage.clone();
    Json(
        collect_blocking(
            "storage",
            move || collector.collect(),
            StorageSnapshot::default(),
        )
        .await,
    )
}

/// GET /api/network
pub(super) async fn network_handler(State(state): State<AppState>) -> Json<NetworkSnapshot> {
    let collector = state.network.clone();
    Json(
        collect_blocking(
            "network",
            move || collector.collect(),
            NetworkSnapshot::default(),
        )
        .await,
    )
}

/// GET /api/docker: `available: false` when the engine is absent or slow.
pub(super) async fn docker_handler(State(state): State<AppState>) -> Json<ContainerSnapshot> {
    Json(state.docker.collect().await)
}

/// GET /api/docker/{id}/stats: on-demand; engine failures surface as 502/504.
pub(super) async fn container_stats_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.docker.container_stats(&id).await {
        Ok(detail) => (StatusCode::OK, Json(serde_json::json!(detail))),
        Err(e) => {
            tracing::info!(container = %id, error = %e, "container stats failed");
            let status = if e.is_timeout() {
                StatusCode::GATEWAY_TIMEOUT
            } else {
                StatusCode::BAD_GATEWAY
            };
            (status, Json(serde_json::json!({ "error": e.to_string() })))
        }
    }
}

/// Bare OPTIONS on an API route; CORS preflights are answered by the CORS layer.
pub(super) async fn options_handler() -> StatusCode {
    StatusCode::OK
}

/// GET /version: returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}
