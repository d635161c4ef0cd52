//! HTTP handlers for companies and jobs.

pub mod companies;
pub mod jobs;

use crate::error::AppError;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::Value;

/// Unwrap a JSON body, reporting malformed input as a bad request.
fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    payload
        .map(|Json(v)| v)
        .map_err(|e| AppError::bad_request(e.body_text()))
}
