// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
///
/// Callers branch on the variant, never on message contents.
#[derive(Debug)]
pub enum AppError {
    // 400 Bad Request
    Validation(String),

    // 400 Bad Request (chainId outside the configured registry)
    UnsupportedChain(String),

    // 400 Bad Request (quiz missing or its active flag is false)
    QuizNotFound(String),

    // 500 Internal Server Error (missing secret / relayer key / credential)
    Configuration(String),

    // 500 Internal Server Error (gateway fetch or metadata parse failure)
    MetadataFetch(String),

    // 500 Internal Server Error (answer key failed to decrypt or is not JSON)
    Decryption(String),

    // 500 Internal Server Error (RPC transport, contract call, ABI decode)
    Chain(String),

    // 500 Internal Server Error
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
///
/// Converts the error into a JSON `{ "error": ... }` body with the
/// appropriate status code. Server-side failures keep their message in the
/// response (the frontend surfaces it verbatim) but are also logged here.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::UnsupportedChain(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::QuizNotFound(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::MetadataFetch(msg) => {
                tracing::error!("Metadata fetch error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::Decryption(msg) => {
                tracing::error!("Decryption error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::Chain(msg) => {
                tracing::error!("Chain error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
