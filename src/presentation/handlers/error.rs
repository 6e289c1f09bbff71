use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::LlmClientError;
use crate::application::services::{AnalysisError, SplitServiceError};
use crate::domain::SelectionError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        let status = match &self {
            AnalysisError::MissingData | AnalysisError::UnknownModel(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AnalysisError::Template { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AnalysisError::Completion(LlmClientError::MissingApiKey) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AnalysisError::Completion(LlmClientError::RateLimited) => {
                StatusCode::TOO_MANY_REQUESTS
            }
            AnalysisError::Completion(_) => StatusCode::BAD_GATEWAY,
        };
        let message = match &self {
            AnalysisError::Completion(LlmClientError::MissingApiKey) => self.to_string(),
            AnalysisError::Completion(_) => format!("Error: {}", self),
            _ => self.to_string(),
        };
        error_response(status, message)
    }
}

impl IntoResponse for SplitServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            SplitServiceError::InvalidFile(_) | SplitServiceError::InvalidName(_) => {
                StatusCode::BAD_REQUEST
            }
            SplitServiceError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            SplitServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            SplitServiceError::Load(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SplitServiceError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            SplitServiceError::Split(_)
            | SplitServiceError::Worker(_)
            | SplitServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "Split request failed");
        } else {
            tracing::warn!(error = %self, "Split request rejected");
        }
        error_response(status, self.to_string())
    }
}

impl IntoResponse for SelectionError {
    fn into_response(self) -> Response {
        error_response(StatusCode::BAD_REQUEST, self.to_string())
    }
}
