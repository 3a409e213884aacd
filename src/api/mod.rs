//! HTTP surface: the upload endpoint and its router

pub mod handler;
pub mod upload;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::ai::{SummaryRequester, client};
use crate::core::config::AppConfig;
use crate::errors::SummarizeError;
use crate::extract::{Extractor, PdfExtractParser, TesseractOcr, TextExtractor};

pub use handler::summarize_document;

pub const SUMMARIZE_PATH: &str = "/api/summarize";

/// Per-process collaborators. Requests share no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<dyn Extractor>,
    pub summarizer: SummaryRequester,
    pub upload_dir: Arc<PathBuf>,
}

impl AppState {
    #[must_use]
    pub fn new(
        extractor: Arc<dyn Extractor>,
        summarizer: SummaryRequester,
        upload_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            extractor,
            summarizer,
            upload_dir: Arc::new(upload_dir.into()),
        }
    }

    /// Wires the production extractor and the configured LLM client.
    ///
    /// # Errors
    ///
    /// Fails when the LLM client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, SummarizeError> {
        let extractor = TextExtractor::new(
            PdfExtractParser::new(),
            TesseractOcr::new(config.tesseract_bin.clone(), config.ocr_language.clone()),
        );
        Ok(Self::new(
            Arc::new(extractor),
            SummaryRequester::new(client::from_config(config)?),
            config.upload_dir.clone(),
        ))
    }
}

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route(SUMMARIZE_PATH, post(summarize_document))
        .route("/health", get(handler::health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
