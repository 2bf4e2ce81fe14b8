//! Request extractors and validation helpers.
//!
//! Handlers take [`AppJson`] and [`AppQuery`] instead of axum's `Json` and
//! `Query`, so a malformed body or query string is answered with the usual
//! `{"success": false, "message": ...}` body.

pub mod query;

use axum::extract::{FromRequest, FromRequestParts};
use serde_json::Value;

use promptkeep_types::error::ValidationError;
use promptkeep_types::prompt::id_string;

use crate::http::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query string parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Unwrap a required request field.
pub fn required<'a>(
    value: &'a Option<String>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    value.as_deref().ok_or(ValidationError::MissingField(field))
}

/// Unwrap a required item id. Numeric ids are accepted in decimal form.
pub fn required_id(value: &Option<Value>) -> Result<String, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::MissingField("id")),
        Some(id) => id_string(id).ok_or_else(|| ValidationError::InvalidField {
            field: "id",
            reason: "must be a string or number".to_string(),
        }),
    }
}
