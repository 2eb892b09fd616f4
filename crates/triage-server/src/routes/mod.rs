//! Request handlers.

pub mod posts;
pub mod tags;

use axum::body::Bytes;
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use serde_json::Value;

use crate::error::ApiError;

/// Liveness probe.
pub async fn health() -> &'static str {
    "OK"
}

/// Decode a JSON request body.
///
/// The content type is checked first so a non-JSON request is a 415 even
/// when its body happens to parse.
pub(crate) fn json_body(headers: &HeaderMap, body: &Bytes) -> Result<Value, ApiError> {
    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"));

    if !is_json {
        return Err(ApiError::UnsupportedMediaType(
            "Unsupported Media Type. Expected application/json".into(),
        ));
    }

    serde_json::from_slice(body)
        .map_err(|_| ApiError::BadRequest("Invalid JSON in request body".into()))
}

/// Pull a required string field out of a JSON object.
pub(crate) fn string_field<'a>(body: &'a Value, field: &str) -> Result<&'a str, ApiError> {
    body.get(field).and_then(Value::as_str).ok_or_else(|| {
        ApiError::BadRequest(format!(
            "Field '{}' is required and must be a string",
            field
        ))
    })
}
