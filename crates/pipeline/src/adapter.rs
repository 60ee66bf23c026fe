//! The prediction adapter: `StudentInput` → `FeatureRow` → model → `PredictionResult`.

use serde::Serialize;
use tracing::{debug, warn};

use score_model::ModelHandle;
use student_schema::{FeatureRow, StudentInput};

use crate::error::PredictionFailure;

/// Message attached to every successful prediction
pub const SUCCESS_MESSAGE: &str = "Prediction successful";

/// The response body of a successful prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub predicted_math_score: f64,
    pub message: String,
}

impl PredictionResult {
    fn new(score: f64) -> Self {
        Self {
            predicted_math_score: round_to_cents(score),
            message: SUCCESS_MESSAGE.to_string(),
        }
    }
}

/// Round to 2 decimal places.
///
/// Rounds the exact decimal value of `value`, with ties going to the even
/// digit, so `2.675` (stored just below) gives `2.67` and `72.125` gives `72.12`.
pub fn round_to_cents(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Runs a single validated request through the model.
///
/// Holds the `ModelHandle` it was built with; cloning is cheap and every
/// clone shares the same model.
#[derive(Debug, Clone)]
pub struct PredictionAdapter {
    model: ModelHandle,
}

impl PredictionAdapter {
    pub fn new(model: ModelHandle) -> Self {
        Self { model }
    }

    pub fn is_ready(&self) -> bool {
        self.model.is_loaded()
    }

    /// Predict the math score for one student.
    ///
    /// # Returns
    /// * `Ok(PredictionResult)` - score rounded to 2 decimal places
    /// * `Err(ModelUnavailable)` - no model was loaded at startup
    /// * `Err(Invocation)` - the model rejected the row or produced no usable value
    pub fn predict(&self, input: &StudentInput) -> Result<PredictionResult, PredictionFailure> {
        let model = self.model.get().ok_or(PredictionFailure::ModelUnavailable)?;

        let row = FeatureRow::from(input);
        debug!("Invoking model '{}' on {:?}", model.name(), row);

        let outputs = model.predict(std::slice::from_ref(&row)).map_err(|e| {
            warn!("Model '{}' failed to predict: {}", model.name(), e);
            PredictionFailure::Invocation(e.to_string())
        })?;

        let Some(&score) = outputs.first() else {
            warn!("Model '{}' returned no predictions", model.name());
            return Err(PredictionFailure::Invocation(
                "Model returned no predictions".to_string(),
            ));
        };

        if !score.is_finite() {
            warn!("Model '{}' produced a non-finite score: {}", model.name(), score);
            return Err(PredictionFailure::Invocation(format!(
                "Model produced a non-finite prediction: {}",
                score
            )));
        }

        Ok(PredictionResult::new(score))
    }
}
