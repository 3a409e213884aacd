//! Multipart intake into a request-scoped temporary file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use axum::extract::multipart::{Field, MultipartError};
use axum::http::StatusCode;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::SummarizeError;

pub const FILE_FIELD: &str = "file";
pub const LENGTH_FIELD: &str = "summaryLength";

const FALLBACK_MIME: &str = "application/octet-stream";

/// A stored upload. The backing file is removed when this value is dropped,
/// on every exit path of the request that owns it.
#[derive(Debug)]
pub struct UploadedFile {
    path: PathBuf,
    media_type: String,
    original_name: String,
}

impl UploadedFile {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    #[must_use]
    pub fn original_name(&self) -> &str {
        &self.original_name
    }
}

impl Drop for UploadedFile {
    // Drop cannot await; a single unlink runs inline on the worker.
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed temporary upload"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            // never allowed to replace the request's own outcome
            Err(e) => warn!(path = %self.path.display(), "Failed to remove temporary upload: {}", e),
        }
    }
}

/// Fields of one summarize request.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    pub summary_length: Option<String>,
}

/// Body-limit overruns keep their 413; everything else is a malformed upload.
fn multipart_error(context: &str, error: MultipartError) -> SummarizeError {
    let detail = format!("{context}: {}", error.body_text());
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        SummarizeError::PayloadTooLarge(detail)
    } else {
        SummarizeError::InvalidUpload(detail)
    }
}

/// Declared type of the part, or a guess from its file name when the client
/// sent none.
fn declared_media_type(content_type: Option<&str>, file_name: &str) -> String {
    match content_type {
        Some(ct) if !ct.trim().is_empty() && ct != FALLBACK_MIME => ct.to_string(),
        _ => mime_guess::from_path(file_name)
            .first_raw()
            .unwrap_or(FALLBACK_MIME)
            .to_string(),
    }
}

async fn persist_field(
    mut field: Field<'_>,
    upload_dir: &Path,
) -> Result<UploadedFile, SummarizeError> {
    let original_name = field.file_name().unwrap_or("upload").to_string();
    let media_type = declared_media_type(field.content_type(), &original_name);

    tokio::fs::create_dir_all(upload_dir).await?;
    let path = upload_dir.join(Uuid::new_v4().to_string());
    let mut out = tokio::fs::File::create(&path).await?;

    // guard first, so a failed stream still cleans up
    let upload = UploadedFile {
        path,
        media_type,
        original_name,
    };

    let mut total_size = 0usize;
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| multipart_error("Failed to read file chunk", e))?
    {
        total_size += chunk.len();
        out.write_all(&chunk).await?;
    }
    out.flush().await?;

    info!(
        file_name = %upload.original_name,
        media_type = %upload.media_type,
        size = total_size,
        "Stored upload"
    );
    Ok(upload)
}

/// Reads the multipart body, storing the single `file` part under
/// `upload_dir`.
///
/// # Errors
///
/// Returns `InvalidUpload` for malformed bodies or a second file part, and
/// `PayloadTooLarge` once the body limit is hit.
pub async fn read_form(
    mut multipart: Multipart,
    upload_dir: &Path,
) -> Result<UploadForm, SummarizeError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Failed to parse multipart data", e))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            FILE_FIELD => {
                if form.file.is_some() {
                    return Err(SummarizeError::InvalidUpload(
                        "Exactly one file may be uploaded.".to_string(),
                    ));
                }
                form.file = Some(persist_field(field, upload_dir).await?);
            }
            LENGTH_FIELD => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| multipart_error("Failed to read summaryLength", e))?;
                form.summary_length = Some(value);
            }
            other => debug!(field = %other, "Ignoring unexpected multipart field"),
        }
    }

    Ok(form)
}
