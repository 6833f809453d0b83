//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model: String,
    pub feature_columns: usize,
    pub dataset: String,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let artifacts = state.forecaster.artifacts();
    let dataset = match &state.history {
        Some(history) => format!("loaded ({} records)", history.len()),
        None => "unavailable".to_string(),
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: artifacts.scorer.kind().to_string(),
        feature_columns: artifacts.schema.len(),
        dataset,
    })
}
