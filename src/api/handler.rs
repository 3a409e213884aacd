//! `POST /api/summarize`: upload, extract, summarize, respond, clean up.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use tracing::{debug, info};

use super::AppState;
use super::upload::{self, UploadedFile};
use crate::core::models::{LengthTier, SummaryRequest, SummaryResponse, SummaryResult};
use crate::errors::SummarizeError;

/// Parses the optional `summaryLength` field; absent means the default tier.
///
/// # Errors
///
/// Returns `InvalidLengthTier` for anything outside short, medium and long.
pub fn resolve_length(raw: Option<&str>) -> Result<LengthTier, SummarizeError> {
    match raw {
        Some(value) if !value.trim().is_empty() => value.parse(),
        _ => Ok(LengthTier::default()),
    }
}

/// Extractor then requester, for an already stored upload.
async fn run_pipeline(
    state: &AppState,
    file: &UploadedFile,
    length: LengthTier,
) -> Result<SummaryResult, SummarizeError> {
    let text = state
        .extractor
        .extract(file.path(), file.media_type())
        .await?;

    state
        .summarizer
        .summarize(SummaryRequest { text, length })
        .await
}

#[tracing::instrument(level = "info", skip_all)]
pub async fn summarize_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SummaryResponse>, SummarizeError> {
    let multipart = multipart.map_err(|e| {
        debug!("Request is not a multipart upload: {}", e);
        SummarizeError::NoFileProvided
    })?;

    let form = upload::read_form(multipart, &state.upload_dir).await?;
    let Some(file) = form.file else {
        return Err(SummarizeError::NoFileProvided);
    };
    let length = resolve_length(form.summary_length.as_deref())?;

    info!(
        file_name = %file.original_name(),
        media_type = %file.media_type(),
        %length,
        "Summarizing upload"
    );

    let summary = run_pipeline(&state, &file, length).await?;
    let response = Json(SummaryResponse {
        summary: summary.into_inner(),
    });

    // removes the temporary file; failures are only logged
    drop(file);
    Ok(response)
}

pub async fn health() -> &'static str {
    "ok"
}
