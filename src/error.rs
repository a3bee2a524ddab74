use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::Error as SqlxError;
use std::collections::HashMap;
use thiserror::Error as ThisError;

pub const MODEL_FAILURE_MESSAGE: &str = "Failed to generate response try again later";

#[derive(Debug, ThisError)]
pub enum NambiError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Request body too large: {0}")]
    PayloadTooLarge(String),

    #[error("Website content is currently unavailable")]
    ContentUnavailable,

    #[error("Model error: {0}")]
    UpstreamModel(String),

    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),
}

impl IntoResponse for NambiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            NambiError::MissingFields(fields) => (
                StatusCode::BAD_REQUEST,
                ApiErrorResponse {
                    error: "Missing required fields".to_string(),
                    details: None,
                    missing_fields: Some(fields),
                },
            ),
            NambiError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ApiErrorResponse::message(msg))
            }
            NambiError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                ApiErrorResponse::message(format!("{what} not found")),
            ),
            NambiError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, ApiErrorResponse::message(msg))
            }
            NambiError::ContentUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiErrorResponse::message(
                    "Website content is currently unavailable. Please try again later.",
                ),
            ),
            // details are echoed to the caller verbatim
            NambiError::UpstreamModel(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorResponse {
                    error: MODEL_FAILURE_MESSAGE.to_string(),
                    details: Some(details),
                    missing_fields: None,
                },
            ),
            NambiError::Fetch { .. } | NambiError::Reqwest(_) => (
                StatusCode::BAD_GATEWAY,
                ApiErrorResponse::message("Upstream service is unavailable."),
            ),
            NambiError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorResponse::message("An internal server error occurred."),
            ),
        };
        (status, Json(body)).into_response()
    }
}

/// JSON error body returned by every failing route.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<String>>,
}

impl ApiErrorResponse {
    fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            missing_fields: None,
        }
    }
}

/// Gemini API error response structure
#[derive(Deserialize, Debug)]
pub struct GeminiError {
    pub error: GeminiErrorBody,
}

#[derive(Deserialize, Debug)]
pub struct GeminiErrorBody {
    pub code: u32,
    pub message: String,
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl GeminiError {
    /// One-line rendering used as the `details` of a model failure.
    pub fn describe(&self) -> String {
        if self.error.status.is_empty() {
            format!("{}: {}", self.error.code, self.error.message)
        } else {
            format!(
                "{} {}: {}",
                self.error.code, self.error.status, self.error.message
            )
        }
    }
}
