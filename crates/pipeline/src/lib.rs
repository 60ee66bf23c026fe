//! Prediction pipeline for validated student requests.
//!
//! This crate provides:
//! - `PredictionAdapter`, which maps a `StudentInput` to the model's feature
//!   row, invokes the model and rounds the result
//! - `PredictionResult`, the success response body
//! - `PredictionFailure`, the two ways a validated request can still fail
//!
//! ## Architecture
//! A request moves through the pipeline in stages:
//! 1. The validator (`student-schema`) produces a `StudentInput`
//! 2. The adapter converts it into exactly one `FeatureRow`
//! 3. The model (`score-model`) predicts a single value
//! 4. The value is rounded to 2 decimal places and wrapped in `PredictionResult`
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::PredictionAdapter;
//!
//! let adapter = PredictionAdapter::new(handle);
//! let input = StudentInput::from_slice(body)?;
//! let result = adapter.predict(&input)?;
//! println!("{}", result.predicted_math_score);
//! ```

pub mod adapter;
pub mod error;

// Re-export main types
pub use adapter::{PredictionAdapter, PredictionResult, SUCCESS_MESSAGE, round_to_cents};
pub use error::PredictionFailure;
