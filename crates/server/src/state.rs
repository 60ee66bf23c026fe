//! Shared application state.
//!
//! Built once at startup and never mutated afterwards, so handlers read it
//! without any locking.

use std::sync::Arc;

use pipeline::PredictionAdapter;

pub struct AppState {
    pub adapter: PredictionAdapter,
}

impl AppState {
    pub fn new(adapter: PredictionAdapter) -> Self {
        Self { adapter }
    }

    pub fn model_loaded(&self) -> bool {
        self.adapter.is_ready()
    }
}

pub type SharedState = Arc<AppState>;
