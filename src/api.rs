//! Shared helpers for the JSON resource API.
//!
//! Every `/api/*` handler reports failures with a fixed, human-readable
//! message naming the resource and operation; the underlying cause is
//! logged, never forwarded to the caller.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// The JSON body used for every API failure, e.g.
/// `{"error": "Failed to fetch customers"}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// The fixed failure message.
    pub error: String,
}

/// Build a JSON error response with the given status code and fixed message.
pub fn json_error(status_code: StatusCode, message: &str) -> Response {
    (
        status_code,
        Json(ErrorBody {
            error: message.to_owned(),
        }),
    )
        .into_response()
}

/// Build the 500 response used when a persistence operation fails
/// unexpectedly.
pub fn internal_error(message: &str) -> Response {
    json_error(StatusCode::INTERNAL_SERVER_ERROR, message)
}
