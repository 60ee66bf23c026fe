//! Health check endpoint

use axum::{Json, extract::State};
use serde::Serialize;

use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
}

/// GET /health - Readiness of the loaded model
pub async fn health_check(State(state): State<SharedState>) -> Json<HealthResponse> {
    let model_loaded = state.model_loaded();
    Json(HealthResponse {
        status: if model_loaded { "ready" } else { "model not loaded" },
        model_loaded,
    })
}
