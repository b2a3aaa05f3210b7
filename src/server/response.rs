//! Outbound response shapes and error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::review::{ReviewOutcome, ReviewVerdict};
use crate::Error;

/// Message used when a review failure carries no text
pub const REVIEW_FAILED: &str = "Failed to generate suggestions";

/// Message relayed for any execution failure
pub const EXECUTION_FAILED: &str = "Failed to execute code";

/// Request status tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// `{status: "success", suggestions, data}`
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub status: Status,
    /// Raw model reply
    pub suggestions: String,
    /// Parsed verdict, `null` when the reply was unstructured
    pub data: Option<ReviewVerdict>,
}

impl From<ReviewOutcome> for ReviewResponse {
    fn from(outcome: ReviewOutcome) -> Self {
        match outcome {
            ReviewOutcome::Structured { verdict, raw_text } => ReviewResponse {
                status: Status::Success,
                suggestions: raw_text,
                data: Some(verdict),
            },
            ReviewOutcome::Unstructured { raw_text } => ReviewResponse {
                status: Status::Success,
                suggestions: raw_text,
                data: None,
            },
        }
    }
}

/// `{status, output}` on success, `{status, message}` on failure
#[derive(Debug, Serialize)]
pub struct CompileResponse {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CompileResponse {
    pub fn success(output: String) -> Self {
        CompileResponse {
            status: Status::Success,
            output: Some(output),
            message: None,
        }
    }

    pub fn failure() -> Self {
        CompileResponse {
            status: Status::Error,
            output: None,
            message: Some(EXECUTION_FAILED.to_string()),
        }
    }
}

/// `{status: "error", message}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: Status,
    pub message: String,
}

/// Handler error rendered as an [`ErrorResponse`]
pub struct AppError(pub Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Error generating AI suggestions: {:?}", self.0);
        }

        let message = self.0.user_message();
        let body = Json(ErrorResponse {
            status: Status::Error,
            message: if message.trim().is_empty() {
                REVIEW_FAILED.to_string()
            } else {
                message
            },
        });
        (status, body).into_response()
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        AppError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unstructured_serializes_null_data() {
        let response = ReviewResponse::from(ReviewOutcome::Unstructured {
            raw_text: "hmm".to_string(),
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "success", "suggestions": "hmm", "data": null})
        );
    }

    #[test]
    fn test_compile_failure_shape() {
        let json = serde_json::to_value(CompileResponse::failure()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "error", "message": "Failed to execute code"})
        );
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError(Error::Validation("Code is required".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError(Error::Config("GEMINI_API_KEY is not set".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError(Error::ModelUnavailable("none".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
