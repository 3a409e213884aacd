//! Text extraction from uploaded documents
//!
//! PDFs go through a PDF parser, raster images through an OCR engine. Both
//! collaborators sit behind traits so the dispatcher can be exercised without
//! either library.

pub mod ocr;
pub mod pdf;

use std::path::Path;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::errors::SummarizeError;

pub use ocr::TesseractOcr;
pub use pdf::PdfExtractParser;

pub const PDF_MIME: &str = "application/pdf";

/// Produces plain text from a stored file of a declared media type.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(&self, path: &Path, media_type: &str) -> Result<String, SummarizeError>;
}

/// Raw text of all pages, concatenated in document order.
#[async_trait]
pub trait PdfParser: Send + Sync {
    async fn parse_pdf(&self, path: &Path) -> Result<String, SummarizeError>;
}

/// Recognized text of a raster image.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, path: &Path) -> Result<String, SummarizeError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Pdf,
    Image,
}

/// Lowercases, drops parameters, and folds the `image/jpg` alias.
#[must_use]
pub fn canonicalize_mime(mime: &str) -> String {
    let main = mime
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    match main.as_str() {
        "image/jpg" => "image/jpeg".to_string(),
        other => other.to_string(),
    }
}

/// # Errors
///
/// Returns `UnsupportedMediaType` for anything that is neither a PDF nor an
/// `image/*` type.
pub fn classify(media_type: &str) -> Result<MediaKind, SummarizeError> {
    let canonical = canonicalize_mime(media_type);
    if canonical == PDF_MIME {
        Ok(MediaKind::Pdf)
    } else if canonical
        .strip_prefix("image/")
        .is_some_and(|subtype| !subtype.is_empty())
    {
        Ok(MediaKind::Image)
    } else {
        Err(SummarizeError::UnsupportedMediaType(media_type.to_string()))
    }
}

/// Dispatches to a PDF parser or an OCR engine by media type.
pub struct TextExtractor<P = PdfExtractParser, O = TesseractOcr> {
    pdf: P,
    ocr: O,
}

impl<P, O> TextExtractor<P, O> {
    pub fn new(pdf: P, ocr: O) -> Self {
        Self { pdf, ocr }
    }
}

#[async_trait]
impl<P, O> Extractor for TextExtractor<P, O>
where
    P: PdfParser,
    O: OcrEngine,
{
    async fn extract(&self, path: &Path, media_type: &str) -> Result<String, SummarizeError> {
        let kind = classify(media_type)?;
        info!(path = %path.display(), ?kind, "Extracting text");

        let text = match kind {
            MediaKind::Pdf => self.pdf.parse_pdf(path).await?,
            MediaKind::Image => self.ocr.recognize(path).await?,
        };

        if text.trim().is_empty() {
            warn!(path = %path.display(), "Extraction produced no text");
            return Err(SummarizeError::ExtractionFailed(
                "document contains no extractable text".to_string(),
            ));
        }

        info!(chars = text.chars().count(), "Extraction finished");
        Ok(text)
    }
}
