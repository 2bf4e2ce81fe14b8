//! Application error type and its JSON failure body.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use promptkeep_types::error::{StoreError, TranslateError, ValidationError};

/// Handler-level error. Rendered as `{"success": false, "message": ...}`.
#[derive(Debug)]
pub enum AppError {
    Store(StoreError),
    Validation(ValidationError),
    Translate(TranslateError),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e)
    }
}

impl From<TranslateError> for AppError {
    fn from(e: TranslateError) -> Self {
        AppError::Translate(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(ValidationError::InvalidField {
            field: "body",
            reason: rejection.body_text(),
        })
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(ValidationError::InvalidField {
            field: "query",
            reason: rejection.body_text(),
        })
    }
}

impl AppError {
    pub fn message(&self) -> String {
        match self {
            AppError::Store(e) => e.to_string(),
            AppError::Validation(e) => e.to_string(),
            AppError::Translate(e) => e.to_string(),
        }
    }

    /// The response body sent to the client.
    pub fn body(&self) -> Value {
        json!({
            "success": false,
            "message": self.message(),
        })
    }

    fn log(&self) {
        match self {
            AppError::Store(e) => tracing::error!(error = %e, "storage operation failed"),
            AppError::Validation(e) => tracing::debug!(error = %e, "rejected request"),
            AppError::Translate(e) => tracing::warn!(error = %e, "translation failed"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        Json(self.body()).into_response()
    }
}
