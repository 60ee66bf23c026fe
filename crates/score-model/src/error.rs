//! Error types for loading and running the score model.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating, loading or invoking the model
#[derive(Error, Debug)]
pub enum ModelError {
    /// None of the candidate locations held a model file
    #[error("Could not find model file in any of the searched locations: {}", join_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    /// The file exists but could not be read
    #[error("Failed to read model file {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not a usable model
    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),

    /// The model needs a column the feature row does not have
    #[error("Model expects feature '{0}' which the input does not provide")]
    MissingFeature(String),

    /// A column held a number where a category was expected, or vice versa
    #[error("Feature '{feature}' should be {expected}")]
    TypeMismatch {
        feature: String,
        expected: &'static str,
    },

    /// A category the model never saw during training
    #[error("Found unknown category '{value}' in feature '{feature}' during transform")]
    UnknownCategory { feature: String, value: String },
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ModelError>;
