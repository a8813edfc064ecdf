//! Error handling

use std::any::Any;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::policy::ClassifyError;
use crate::scoring::panic_message;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// Rejected or failed classification, reported as an `error` verdict.
    Classify(ClassifyError),

    // Plain request errors on the auxiliary endpoints
    BadRequest(String),

    /// `/predict` called with no score model loaded.
    ModelUnavailable,

    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Classify(err) => {
                let status = if err.is_client_error() {
                    StatusCode::BAD_REQUEST
                } else {
                    tracing::error!("Classification failed: {}", err);
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (status, Json(err.to_classification())).into_response()
            }
            AppError::BadRequest(msg) => error_body(StatusCode::BAD_REQUEST, &msg),
            AppError::ModelUnavailable => {
                error_body(StatusCode::SERVICE_UNAVAILABLE, "Score model not loaded")
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

fn error_body(status: StatusCode, message: &str) -> Response {
    let body = Json(json!({
        "error": message,
        "status": status.as_u16()
    }));
    (status, body).into_response()
}

impl From<ClassifyError> for AppError {
    fn from(err: ClassifyError) -> Self {
        AppError::Classify(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Classify(ClassifyError::InvalidRequest(rejection.body_text()))
    }
}

/// Response for a panic caught by the router.
pub(crate) fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic_message(payload.as_ref());
    tracing::error!(panic = %message, "handler panicked");
    AppError::Classify(ClassifyError::Internal(message)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_is_400() {
        let response = AppError::from(ClassifyError::MissingField("URL")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_classify_error_is_500() {
        let response = AppError::from(ClassifyError::Internal("boom".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_model_unavailable_is_503() {
        let response = AppError::ModelUnavailable.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_panic_response_is_error_verdict() {
        let response = handle_panic(Box::new("oops"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
