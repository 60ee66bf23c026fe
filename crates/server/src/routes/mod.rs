//! HTTP route handlers
//!
//! The root endpoint lives here; `/health` and `/predict` have their own modules.

pub mod health;
pub mod predict;

use axum::Json;
use serde::Serialize;

pub const ROOT_MESSAGE: &str = "Student Performance Prediction API - POST student data to /predict";

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// GET / - Static service description
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: ROOT_MESSAGE,
    })
}
