use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;
use crate::voting::engine::VoteError;

/// Errors surfaced by the HTTP handlers.
///
/// Business-rule rejections answer 400 inside the voting response envelope;
/// persistence failures answer 500 with a bare error object. Reward
/// distribution failures never reach this type.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request")]
    InvalidRequest,
    #[error(transparent)]
    Vote(#[from] VoteError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Vote(VoteError::Store(e)) | ApiError::Store(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response(),
            ApiError::Vote(e) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "error": e.to_string() })),
            )
                .into_response(),
            ApiError::InvalidRequest => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "error": "Invalid request" })),
            )
                .into_response(),
        }
    }
}
