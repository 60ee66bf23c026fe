//! The `Predictor` seam and the shared `ModelHandle`.

use std::fmt;
use std::sync::Arc;

use student_schema::FeatureRow;

use crate::error::Result;

/// Anything that can turn feature rows into predicted scores.
///
/// `Send + Sync` lets one instance serve every request concurrently;
/// implementations must not need `&mut self` to predict.
pub trait Predictor: Send + Sync {
    /// Human-readable model name (for logging)
    fn name(&self) -> &str;

    /// Predict one value per row, in row order.
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>>;
}

/// Process-wide, read-only handle to the loaded model.
///
/// Empty when the loader failed; the service then runs degraded and
/// reports "model not loaded". Cloning only bumps a reference count.
#[derive(Clone, Default)]
pub struct ModelHandle {
    model: Option<Arc<dyn Predictor>>,
}

impl ModelHandle {
    /// A handle with no model behind it
    pub fn empty() -> Self {
        Self { model: None }
    }

    pub fn new(model: impl Predictor + 'static) -> Self {
        Self {
            model: Some(Arc::new(model)),
        }
    }

    pub fn from_arc(model: Arc<dyn Predictor>) -> Self {
        Self { model: Some(model) }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn get(&self) -> Option<&dyn Predictor> {
        self.model.as_deref()
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(model) => f.debug_tuple("ModelHandle").field(&model.name()).finish(),
            None => f.write_str("ModelHandle(<empty>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(f64);

    impl Predictor for Constant {
        fn name(&self) -> &str {
            "constant"
        }

        fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>> {
            Ok(vec![self.0; rows.len()])
        }
    }

    #[test]
    fn test_empty_handle() {
        let handle = ModelHandle::empty();
        assert!(!handle.is_loaded());
        assert!(handle.get().is_none());
        assert_eq!(format!("{:?}", handle), "ModelHandle(<empty>)");
    }

    #[test]
    fn test_clones_share_the_model() {
        let handle = ModelHandle::new(Constant(1.0));
        let clone = handle.clone();
        assert!(clone.is_loaded());
        assert_eq!(clone.get().map(|m| m.name()), Some("constant"));
        assert_eq!(format!("{:?}", clone), "ModelHandle(\"constant\")");
    }
}
