//! HTTP surface.
//!
//! ```text
//! GET  /health    liveness and loaded capabilities
//! POST /classify  {type, payload} -> classification result
//! POST /predict   {url} -> raw score model output
//! POST /analyze   {prompt} -> content category
//! ```

mod error;
mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::policy::Engine;

pub use error::{AppError, AppResult};
pub use handlers::{HealthResponse, PredictResponse};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
}

impl AppState {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

/// Create the router with all routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/classify", post(handlers::classify))
        .route("/predict", post(handlers::predict))
        .route("/analyze", post(handlers::analyze))
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
