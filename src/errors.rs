use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::core::models::ErrorResponse;

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("No file was provided in the upload")]
    NoFileProvided,

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Failed to extract text: {0}")]
    ExtractionFailed(String),

    #[error("Failed to generate summary: {0}")]
    SummaryGenerationFailed(String),

    #[error("Invalid summary length: {0}")]
    InvalidLengthTier(String),

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Upload exceeds the size limit: {0}")]
    PayloadTooLarge(String),

    #[error("Unexpected internal error: {0}")]
    InternalUnexpected(String),
}

impl SummarizeError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            SummarizeError::NoFileProvided
            | SummarizeError::InvalidLengthTier(_)
            | SummarizeError::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            SummarizeError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            SummarizeError::UnsupportedMediaType(_)
            | SummarizeError::ExtractionFailed(_)
            | SummarizeError::SummaryGenerationFailed(_)
            | SummarizeError::InternalUnexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand back to the caller. Provider and parser details
    /// stay in the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SummarizeError::NoFileProvided => "No file uploaded.".to_string(),
            SummarizeError::UnsupportedMediaType(_) => "Unsupported file type.".to_string(),
            SummarizeError::ExtractionFailed(_) => "Error extracting text from file.".to_string(),
            SummarizeError::SummaryGenerationFailed(_) => {
                "Failed to generate summary from AI service.".to_string()
            }
            SummarizeError::InvalidLengthTier(value) => {
                format!("Invalid summaryLength '{value}'. Expected short, medium or long.")
            }
            SummarizeError::InvalidUpload(message) => message.clone(),
            SummarizeError::PayloadTooLarge(_) => "File is too large.".to_string(),
            SummarizeError::InternalUnexpected(_) => "Failed to process document.".to_string(),
        }
    }
}

impl IntoResponse for SummarizeError {
    fn into_response(self) -> Response {
        match &self {
            SummarizeError::NoFileProvided
            | SummarizeError::InvalidLengthTier(_)
            | SummarizeError::InvalidUpload(_)
            | SummarizeError::PayloadTooLarge(_) => {
                tracing::debug!("Client error: {}", self);
            }
            _ => {
                tracing::error!("Failed to process document: {}", self);
            }
        }

        let body = ErrorResponse {
            error: self.user_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

impl From<std::io::Error> for SummarizeError {
    fn from(error: std::io::Error) -> Self {
        SummarizeError::InternalUnexpected(error.to_string())
    }
}
