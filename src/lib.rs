/// SummarMuse - turns an uploaded PDF or image into a length-tunable summary.
///
/// The server side is one HTTP endpoint that stores the upload in a scoped
/// temporary file, extracts its text (PDF parsing or OCR), asks an LLM for a
/// summary with `*`-marked key phrases, and returns it as JSON. The client
/// side drives the upload as a small state machine and renders the emphasis
/// markers.
///
/// # Architecture
///
/// The system uses:
/// - axum for the multipart upload endpoint
/// - pdf-extract and the Tesseract executable for text extraction
/// - reqwest for the Gemini / `OpenAI` completion APIs
/// - Tokio for async runtime
///
/// # Example
///
/// ```no_run
/// use summarmuse::api::{AppState, router};
/// use summarmuse::core::config::AppConfig;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     summarmuse::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     let app = router(AppState::from_config(&config)?, config.max_upload_bytes);
///
///     let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
///     axum::serve(listener, app).await?;
///     Ok(())
/// }
/// ```
// Module declarations
pub mod ai;
pub mod api;
pub mod client;
pub mod core;
pub mod errors;
pub mod extract;
pub mod render;

pub use errors::SummarizeError;

/// Configure structured logging with JSON format.
///
/// Level filtering follows `RUST_LOG`, defaulting to `info`. Calling it more
/// than once is harmless; later calls leave the first subscriber in place.
///
/// # Example
///
/// ```
/// summarmuse::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
