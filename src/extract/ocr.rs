use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error};

use super::OcrEngine;
use crate::errors::SummarizeError;

/// Runs the Tesseract executable against one image with a single language
/// model and reads the recognized text from stdout.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    binary: String,
    language: String,
}

impl TesseractOcr {
    #[must_use]
    pub fn new(binary: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
        }
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new("tesseract", "eng")
    }
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    async fn recognize(&self, path: &Path) -> Result<String, SummarizeError> {
        debug!(binary = %self.binary, lang = %self.language, path = %path.display(), "Running OCR");

        let output = Command::new(&self.binary)
            .arg(path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .await
            .map_err(|e| {
                error!("Failed to run {}: {}", self.binary, e);
                SummarizeError::ExtractionFailed(format!("Failed to run OCR engine: {e}"))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!(status = %output.status, "OCR engine failed: {}", stderr.trim());
            return Err(SummarizeError::ExtractionFailed(format!(
                "OCR engine exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
