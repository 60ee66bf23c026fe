//! Prediction endpoint

use axum::{Json, body::Bytes, extract::State};
use tracing::debug;

use pipeline::PredictionResult;
use student_schema::StudentInput;

use crate::error::ApiError;
use crate::state::SharedState;

/// POST /predict - Predict a student's math score
///
/// The body is read as raw bytes so malformed JSON is reported in the same
/// field-error format as any other validation failure.
pub async fn predict(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<PredictionResult>, ApiError> {
    let input = StudentInput::from_slice(&body).map_err(|e| {
        debug!("Rejected prediction request: {}", e);
        e
    })?;

    let result = state.adapter.predict(&input)?;
    debug!("Predicted math score {}", result.predicted_math_score);
    Ok(Json(result))
}
