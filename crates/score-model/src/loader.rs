//! Locating and loading the model artifact at startup.
//!
//! `ModelLoader::load` is the only entry point the service uses. It never
//! fails: any problem is logged and produces an empty `ModelHandle`, so the
//! service can still start and report itself as not ready.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::artifact::LinearPipeline;
use crate::error::{ModelError, Result};
use crate::predictor::{ModelHandle, Predictor};

/// File name the training pipeline exports
pub const MODEL_FILE_NAME: &str = "best_student_performance_model.json";

/// Directory, next to the service, that holds the artifact
pub const MODEL_DIR: &str = "models";

/// Ordered list of places the artifact may live. The first existing file wins.
#[derive(Debug, Clone)]
pub struct ModelLocator {
    candidates: Vec<PathBuf>,
}

impl ModelLocator {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    /// Look only at `path`
    pub fn explicit(path: impl Into<PathBuf>) -> Self {
        Self {
            candidates: vec![path.into()],
        }
    }

    /// The install-relative locations:
    /// 1. `<exe dir>/models/<file>`
    /// 2. `<exe dir>/../models/<file>`
    /// 3. `./models/<file>`
    pub fn default_locations() -> Self {
        let mut candidates = Vec::new();
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            candidates.push(exe_dir.join(MODEL_DIR).join(MODEL_FILE_NAME));
            candidates.push(exe_dir.join("..").join(MODEL_DIR).join(MODEL_FILE_NAME));
        }
        candidates.push(PathBuf::from(MODEL_DIR).join(MODEL_FILE_NAME));
        Self { candidates }
    }

    /// An operator-supplied path replaces the search; otherwise use the defaults.
    pub fn resolve(model_path: Option<PathBuf>) -> Self {
        match model_path {
            Some(path) => Self::explicit(path),
            None => Self::default_locations(),
        }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Return the first candidate that exists as a file
    pub fn locate(&self) -> Result<PathBuf> {
        for path in &self.candidates {
            debug!("Looking for model at {}", path.display());
            if path.is_file() {
                return Ok(path.clone());
            }
        }
        Err(ModelError::NotFound {
            searched: self.candidates.clone(),
        })
    }
}

/// Read and validate the artifact at `path`
pub fn load_model(path: &Path) -> Result<LinearPipeline> {
    let text = fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    LinearPipeline::from_json(&text)
}

/// Runs the locate-then-load sequence once at startup.
#[derive(Debug, Clone)]
pub struct ModelLoader {
    locator: ModelLocator,
}

impl ModelLoader {
    pub fn new(locator: ModelLocator) -> Self {
        Self { locator }
    }

    pub fn locator(&self) -> &ModelLocator {
        &self.locator
    }

    /// Locate and load, surfacing the cause of any failure.
    pub fn try_load(&self) -> Result<(PathBuf, LinearPipeline)> {
        let path = self.locator.locate()?;
        info!("Found model at: {}", path.display());
        let model = load_model(&path)?;
        Ok((path, model))
    }

    /// Locate and load, degrading to an empty handle on failure.
    pub fn load(&self) -> ModelHandle {
        match self.try_load() {
            Ok((_, model)) => {
                info!(
                    "Model '{}' loaded successfully ({} features, target '{}')",
                    model.name,
                    model.feature_names().count(),
                    model.target
                );
                let model: Arc<dyn Predictor> = Arc::new(model);
                ModelHandle::from_arc(model)
            }
            Err(e) => {
                error!("Error loading model: {}", e);
                ModelHandle::empty()
            }
        }
    }
}
