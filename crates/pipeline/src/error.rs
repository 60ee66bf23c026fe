//! Failure cases of the prediction adapter.

use thiserror::Error;

/// Why a validated request did not produce a prediction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionFailure {
    /// The loader did not produce a model; nothing was invoked
    #[error("Model not loaded. Please check server logs for loading errors.")]
    ModelUnavailable,

    /// Feature mapping or the model itself failed for this request
    #[error("{0}")]
    Invocation(String),
}
