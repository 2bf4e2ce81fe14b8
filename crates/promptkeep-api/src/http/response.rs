//! Success bodies.
//!
//! Mutations answer `{"success": true}`; reads answer with the payload under
//! a single named field (`{"data": ...}`, `{"histories": [...]}`).

use axum::Json;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::http::error::AppError;

pub type ApiResult = Result<Json<Value>, AppError>;

/// `{"success": true}`.
pub fn success() -> ApiResult {
    Ok(Json(json!({ "success": true })))
}

/// `{"success": <flag>}`.
pub fn success_flag(flag: bool) -> ApiResult {
    Ok(Json(json!({ "success": flag })))
}

/// `{"success": true, <field>: <value>}`.
pub fn success_with(field: &str, value: impl Serialize) -> ApiResult {
    let mut body = Map::new();
    body.insert("success".to_string(), Value::Bool(true));
    body.insert(field.to_string(), to_json(value));
    Ok(Json(Value::Object(body)))
}

/// `{<field>: <value>}`.
pub fn field(field: &str, value: impl Serialize) -> ApiResult {
    let mut body = Map::new();
    body.insert(field.to_string(), to_json(value));
    Ok(Json(Value::Object(body)))
}

fn to_json(value: impl Serialize) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to serialize response field");
        Value::Null
    })
}
