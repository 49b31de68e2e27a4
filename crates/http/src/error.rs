//! Error handling for the HTTP layer

use std::any::Any;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use uuid::Uuid;

const INTERNAL_MESSAGE: &str = "an internal server error occurred";

/// Standard error response format for all HTTP errors
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: Vec<serde_json::Value>,
    pub trace_id: String,
    pub timestamp: String,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation error: {message}")]
    Validation {
        details: Vec<serde_json::Value>,
        code: String,
        message: String,
    },

    #[error("conflict: {message}")]
    Conflict { message: String, code: String },

    #[error("not found: {message}")]
    NotFound { message: String, code: String },

    #[error("unauthorized: {message}")]
    Unauthorized { message: String, code: String },

    #[error("bad request: {message}")]
    BadRequest { message: String, code: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error listing the offending fields
    pub fn validation(details: Vec<serde_json::Value>, message: impl Into<String>) -> Self {
        Self::Validation {
            details,
            code: "validation_error".to_string(),
            message: message.into(),
        }
    }

    /// Validation error for required fields that were absent or empty
    pub fn missing_fields(fields: &[&str]) -> Self {
        let details = fields
            .iter()
            .map(|field| json!({ "field": field, "error": "required" }))
            .collect();
        Self::validation(
            details,
            format!("missing required fields: {}", fields.join(", ")),
        )
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            code: "conflict".to_string(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: "not_found".to_string(),
        }
    }

    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
            code: "unauthorized".to_string(),
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            code: "bad_request".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Internal(anyhow::Error::new(err).context("database operation failed"))
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(err: tower_sessions::session::Error) -> Self {
        AppError::Internal(anyhow::Error::new(err).context("session store operation failed"))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let trace_id = Uuid::now_v7();
        let timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default();

        let (code, message, details) = match self {
            AppError::Validation {
                details,
                code,
                message,
            } => {
                tracing::warn!(trace_id = %trace_id, error_code = %code, %message, "request rejected");
                (code, message, details)
            }
            AppError::Conflict { message, code }
            | AppError::NotFound { message, code }
            | AppError::Unauthorized { message, code }
            | AppError::BadRequest { message, code } => {
                tracing::warn!(
                    trace_id = %trace_id,
                    error_code = %code,
                    status_code = %status.as_u16(),
                    %message,
                    "request rejected"
                );
                (code, message, Vec::new())
            }
            AppError::Internal(e) => {
                tracing::error!(
                    trace_id = %trace_id,
                    status_code = %status.as_u16(),
                    error = ?e,
                    "request failed"
                );
                // Operators get the full chain in the log; callers only see it in debug builds.
                let details = if cfg!(debug_assertions) {
                    vec![json!({ "cause": format!("{e:#}") })]
                } else {
                    Vec::new()
                };
                ("internal_error".to_string(), INTERNAL_MESSAGE.to_string(), details)
            }
        };

        let body = ErrorBody {
            code,
            message,
            details,
            trace_id: trace_id.to_string(),
            timestamp,
        };

        (status, Json(json!({ "error": body }))).into_response()
    }
}

/// Fallback for unmatched routes
pub async fn route_not_found() -> AppError {
    AppError::not_found("route not found")
}

/// Render a caught handler panic as the standard 500 body
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_missing_fields_error() {
        let error = AppError::missing_fields(&["title", "year"]);

        match error {
            AppError::Validation {
                details,
                code,
                message,
            } => {
                assert_eq!(details.len(), 2);
                assert_eq!(details[0], json!({"field": "title", "error": "required"}));
                assert_eq!(code, "validation_error");
                assert_eq!(message, "missing required fields: title, year");
            }
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(AppError::missing_fields(&["name"]).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::conflict("dup").status(), StatusCode::CONFLICT);
        assert_eq!(AppError::unauthorized("no").status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::not_found("gone").into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_error_response_format() {
        let response = AppError::not_found("book not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "not_found");
        assert_eq!(body["error"]["message"], "book not found");
        assert!(body["error"]["details"].as_array().unwrap().is_empty());
        assert!(Uuid::parse_str(body["error"]["trace_id"].as_str().unwrap()).is_ok());
        assert!(body["error"]["timestamp"].as_str().unwrap().contains('T'));
    }

    #[tokio::test]
    async fn test_internal_error_message_is_generic() {
        let error: AppError = sqlx::Error::RowNotFound.into();
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "internal_error");
        assert_eq!(body["error"]["message"], INTERNAL_MESSAGE);
    }

    #[tokio::test]
    async fn query_rejection_is_a_bad_request() {
        let uri: axum::http::Uri = "/books?year=abc".parse().unwrap();
        let rejection = axum::extract::Query::<std::collections::HashMap<String, i64>>::try_from_uri(&uri)
            .unwrap_err();

        let response = AppError::from(rejection).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "bad_request");
    }

    #[tokio::test]
    async fn test_panic_response() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
