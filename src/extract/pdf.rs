use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::error;

use super::PdfParser;
use crate::errors::SummarizeError;

/// `pdf-extract` backed parser. Parsing is CPU bound and synchronous, so it
/// runs on the blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractParser;

impl PdfExtractParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// # Errors
///
/// Returns `ExtractionFailed` when the file cannot be read or parsed.
pub fn parse_pdf_blocking(path: &Path) -> Result<String, SummarizeError> {
    pdf_extract::extract_text(path).map_err(|e| {
        error!(path = %path.display(), "PDF parse error: {}", e);
        SummarizeError::ExtractionFailed(format!("Error parsing PDF file: {e}"))
    })
}

#[async_trait]
impl PdfParser for PdfExtractParser {
    async fn parse_pdf(&self, path: &Path) -> Result<String, SummarizeError> {
        let owned: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || parse_pdf_blocking(&owned))
            .await
            .map_err(|e| {
                // the parser panicked on malformed input
                error!("PDF parser task failed: {}", e);
                SummarizeError::ExtractionFailed(format!("PDF parser aborted: {e}"))
            })?
    }
}
