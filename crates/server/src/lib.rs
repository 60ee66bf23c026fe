//! Server crate for the student score service.
//!
//! This crate wires the validator, the prediction adapter and the loaded
//! model into an axum HTTP API:
//! - `GET /` - static service description
//! - `GET /health` - whether the model is loaded
//! - `POST /predict` - predict a student's math score

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use pipeline::PredictionAdapter;
use score_model::{ModelHandle, ModelLoader, ModelLocator};

pub use config::{Cli, ServerConfig};
pub use error::ApiError;
pub use state::{AppState, SharedState};

/// Build the application router around already-constructed state
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health::health_check))
        .route("/predict", post(routes::predict::predict))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Shared state for a model handle
pub fn app_state(model: ModelHandle) -> SharedState {
    Arc::new(AppState::new(PredictionAdapter::new(model)))
}

/// Load the model once and decide whether the service may start.
pub fn load_model(config: &ServerConfig) -> Result<ModelHandle> {
    let loader = ModelLoader::new(ModelLocator::resolve(config.model_path.clone()));
    let handle = loader.load();

    if let Ok(cwd) = std::env::current_dir() {
        info!("Current working directory: {}", cwd.display());
    }

    if handle.is_loaded() {
        info!("Model is loaded");
    } else if config.require_model {
        bail!(
            "Model could not be loaded from any of {:?} and --require-model is set",
            loader.locator().candidates()
        );
    } else {
        warn!("Model is NOT loaded; /predict will fail until the service is redeployed");
    }

    Ok(handle)
}

/// Load the model, bind the listener and serve until Ctrl-C / SIGTERM.
pub async fn run(config: ServerConfig) -> Result<()> {
    let handle = load_model(&config)?;
    let app = router(app_state(handle));

    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Binding {}", config.bind_addr()))?;
    info!("Starting server on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Serving HTTP")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
