//! Request handlers

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::features::UrlFeatures;
use crate::policy::{ClassifyError, ClassifyRequest};
use crate::scoring::panic_message;
use crate::server::error::{AppError, AppResult};
use crate::server::AppState;
use crate::text::ContentAnalysis;
use crate::verdict::Classification;

/// Scores at or above this count as a positive prediction.
const PREDICTION_CUTOFF: f64 = 0.5;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    model_loaded: bool,
    phishing_db_loaded: bool,
    phishing_db_size: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let urls = state.engine.urls();
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        model_loaded: urls.scorer().has_model(),
        phishing_db_loaded: urls.reputation().is_loaded(),
        phishing_db_size: urls.reputation().len(),
    })
}

pub async fn classify(
    State(state): State<AppState>,
    body: Result<Json<ClassifyRequest>, JsonRejection>,
) -> AppResult<Json<Classification>> {
    let Json(request) = body?;
    let engine = state.engine.clone();

    // Model inference holds a lock, keep it off the async workers
    let result = tokio::task::spawn_blocking(move || engine.classify(&request))
        .await
        .map_err(|e| {
            let message = if e.is_panic() {
                panic_message(e.into_panic().as_ref())
            } else {
                e.to_string()
            };
            ClassifyError::Internal(message)
        })??;

    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PredictResponse {
    pub url: String,
    pub prediction: u8,
    pub score: f64,
}

/// Raw score model output for one URL.
pub async fn predict(
    State(state): State<AppState>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Json(request) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    if request.url.is_empty() {
        return Err(AppError::BadRequest("url required".to_string()));
    }
    if !state.engine.urls().scorer().has_model() {
        return Err(AppError::ModelUnavailable);
    }

    let engine = state.engine.clone();
    let url = request.url;
    let (url, score) = tokio::task::spawn_blocking(move || {
        let provider = engine.urls().scorer().provider().ok_or(AppError::ModelUnavailable)?;
        let score = provider
            .score(&UrlFeatures::extract(&url))
            .map_err(|e| AppError::Internal(e.to_string()))?;
        Ok::<_, AppError>((url, score))
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(Json(PredictResponse {
        url,
        prediction: u8::from(score >= PREDICTION_CUTOFF),
        score,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub prompt: Option<String>,
}

/// Keyword category analysis of a prompt.
pub async fn analyze(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> AppResult<Json<ContentAnalysis>> {
    let Json(request) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let prompt = request
        .prompt
        .ok_or_else(|| AppError::BadRequest("prompt required".to_string()))?;
    Ok(Json(state.engine.content().analyze(&prompt)))
}
