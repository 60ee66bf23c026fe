//! Request-boundary errors and their HTTP mapping.
//!
//! | error                       | status |
//! |-----------------------------|--------|
//! | validation                  | 422    |
//! | model invocation failure    | 400    |
//! | model not loaded            | 500    |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use pipeline::PredictionFailure;
use student_schema::ValidationErrors;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Prediction(#[from] PredictionFailure),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Prediction(PredictionFailure::ModelUnavailable) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Prediction(PredictionFailure::Invocation(_)) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(errors) => json!({ "detail": errors.errors() }),
            ApiError::Prediction(failure) => json!({ "detail": failure.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
