//! Model loading and invocation for the student score service.
//!
//! This crate provides:
//! - the `Predictor` trait, the seam between the service and the model
//! - `LinearPipeline`, the fitted regression read from the JSON artifact
//! - `ModelHandle`, the shared read-only handle injected into the service
//! - `ModelLocator` / `ModelLoader` for finding and loading the artifact once
//!
//! ## Example Usage
//! ```ignore
//! use score_model::{ModelLoader, ModelLocator};
//!
//! let handle = ModelLoader::new(ModelLocator::default_locations()).load();
//! if !handle.is_loaded() {
//!     // service starts degraded; /health reports "model not loaded"
//! }
//! ```

pub mod artifact;
pub mod error;
pub mod loader;
pub mod predictor;

pub use artifact::{CategoricalTerm, HandleUnknown, LinearPipeline, NumericTerm};
pub use error::{ModelError, Result};
pub use loader::{MODEL_DIR, MODEL_FILE_NAME, ModelLoader, ModelLocator, load_model};
pub use predictor::{ModelHandle, Predictor};
