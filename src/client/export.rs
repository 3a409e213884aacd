use std::io;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

/// Download formats. `Pdf` only labels the raw text with a PDF name and
/// content type; no PDF layout is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    #[value(name = "txt")]
    Text,
    Pdf,
}

impl ExportFormat {
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Text => "summary.txt",
            ExportFormat::Pdf => "summary.pdf",
        }
    }

    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Text => "text/plain",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub contents: Vec<u8>,
}

impl Export {
    #[must_use]
    pub fn new(format: ExportFormat, summary: &str) -> Self {
        Self {
            file_name: format.file_name(),
            content_type: format.content_type(),
            contents: summary.as_bytes().to_vec(),
        }
    }

    /// Writes the payload into `dir` under its file name.
    ///
    /// # Errors
    ///
    /// Propagates filesystem errors.
    pub async fn save_in(&self, dir: &Path) -> io::Result<PathBuf> {
        let target = dir.join(self.file_name);
        tokio::fs::write(&target, &self.contents).await?;
        Ok(target)
    }
}
