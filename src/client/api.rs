//! Multipart upload to the summarize endpoint.

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use thiserror::Error;
use tracing::info;
use url::Url;

use super::session::UploadRequest;
use crate::api::SUMMARIZE_PATH;
use crate::api::upload::{FILE_FIELD, LENGTH_FIELD};
use crate::core::models::{ErrorResponse, SummaryResponse};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to send HTTP request: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Server responded {status}: {message}")]
    Server { status: u16, message: String },
}

pub struct SummarizeClient {
    http: Client,
    endpoint: Url,
}

impl SummarizeClient {
    /// # Errors
    ///
    /// Returns `InvalidUrl` if the endpoint cannot be joined onto `server`.
    pub fn new(server: &Url) -> Result<Self, ClientError> {
        Ok(Self {
            http: Client::new(),
            endpoint: server.join(SUMMARIZE_PATH)?,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends the file and tier, returning the summary string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the request fails, or the
    /// server answers with a non-success status.
    pub async fn upload(&self, request: &UploadRequest) -> Result<String, ClientError> {
        let file = &request.file;
        let bytes = tokio::fs::read(file.path())
            .await
            .map_err(|source| ClientError::Io {
                path: file.path().display().to_string(),
                source,
            })?;

        let part = Part::bytes(bytes)
            .file_name(file.name().to_string())
            .mime_str(file.media_type())?;
        let form = Form::new()
            .part(FILE_FIELD, part)
            .text(LENGTH_FIELD, request.length.as_str());

        info!(endpoint = %self.endpoint, file = %file.name(), length = %request.length, "Uploading document");

        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let payload: SummaryResponse = response.json().await?;
        Ok(payload.summary)
    }
}
