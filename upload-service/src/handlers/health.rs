use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::models::StorageStatus;
use crate::AppState;

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let storage = if state.storage.is_some() {
        StorageStatus::Available
    } else {
        StorageStatus::Unavailable
    };

    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "upload-service",
            "version": env!("CARGO_PKG_VERSION"),
            "storage": storage,
        })),
    )
}
