//! Request-level errors and their HTTP rendering
//!
//! Every error is answered with a JSON body of the form
//! `{"error": "<message>"}`. Server-side failures are logged and replaced by a
//! generic message so store internals never leak to clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::target::TargetError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request body could not be parsed
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    InvalidTarget(#[from] TargetError),

    #[error("invalid short code `{0}`: use 1-32 letters, digits, '-' or '_'")]
    InvalidCode(String),

    #[error("short code `{0}` is already in use")]
    CodeTaken(String),

    #[error("short link `{0}` not found")]
    NotFound(String),

    #[error("no free short code found after {0} attempts")]
    CodeSpaceExhausted(usize),

    #[error("store error: {0}")]
    Store(#[from] redb::Error),

    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::InvalidTarget(_) | AppError::InvalidCode(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::CodeTaken(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::CodeSpaceExhausted(_) | AppError::Store(_) | AppError::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn render(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_server_errors_are_masked() {
        let (status, body) = render(AppError::CodeSpaceExhausted(8)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "internal server error" }));
    }

    #[tokio::test]
    async fn test_client_errors_keep_their_message() {
        let (status, body) = render(AppError::NotFound("abc123".to_string())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "short link `abc123` not found" }));
    }
}
