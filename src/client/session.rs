//! Front-end session state.
//!
//! The upload flow is a state machine over [`Phase`]; a request can only be in
//! flight with a file attached, and at most one at a time.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::error;

use super::api::ClientError;
use super::export::{Export, ExportFormat};
use crate::core::models::LengthTier;

pub const NO_FILE_MESSAGE: &str = "Please upload a file first.";
pub const REQUEST_FAILED_MESSAGE: &str =
    "Failed to generate summary. Please check the server or file.";

/// Accepted upload types and the extensions that select them.
pub const ACCEPTED_TYPES: [(&str, &[&str]); 3] = [
    ("application/pdf", &["pdf"]),
    ("image/png", &["png"]),
    ("image/jpeg", &["jpg", "jpeg"]),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("{0} is not a PDF, PNG or JPEG file")]
    UnsupportedType(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    path: PathBuf,
    name: String,
    media_type: &'static str,
}

impl SelectedFile {
    /// # Errors
    ///
    /// Returns `UnsupportedType` when the extension is not an accepted type.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SelectionError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        let media_type = ACCEPTED_TYPES
            .iter()
            .find(|(_, exts)| exts.contains(&extension.as_str()))
            .map(|(mime, _)| *mime)
            .ok_or_else(|| SelectionError::UnsupportedType(name.clone()))?;

        Ok(Self {
            path: path.to_path_buf(),
            name,
            media_type,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn media_type(&self) -> &'static str {
        self.media_type
    }
}

/// What [`Session::begin_request`] hands to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file: SelectedFile,
    pub length: LengthTier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle { error: Option<String> },
    FileSelected { file: SelectedFile },
    Requesting { file: SelectedFile },
    Success { file: SelectedFile, summary: String },
    Failure { file: SelectedFile, error: String },
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Idle { error: None }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    length: LengthTier,
    phase: Phase,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn length(&self) -> LengthTier {
        self.length
    }

    pub fn set_length(&mut self, length: LengthTier) {
        self.length = length;
    }

    #[must_use]
    pub fn file(&self) -> Option<&SelectedFile> {
        match &self.phase {
            Phase::Idle { .. } => None,
            Phase::FileSelected { file }
            | Phase::Requesting { file }
            | Phase::Success { file, .. }
            | Phase::Failure { file, .. } => Some(file),
        }
    }

    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        match &self.phase {
            Phase::Success { summary, .. } => Some(summary),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Idle { error } => error.as_deref(),
            Phase::Failure { error, .. } => Some(error),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        matches!(self.phase, Phase::Requesting { .. })
    }

    /// Replaces the selected file, dropping any summary or error. Ignored
    /// while a request is in flight; returns whether the selection took.
    pub fn select_file(&mut self, file: SelectedFile) -> bool {
        if self.is_in_flight() {
            return false;
        }
        self.phase = Phase::FileSelected { file };
        true
    }

    /// Starts a request for the current file and tier. With no file this only
    /// records the "no file" error; while in flight it does nothing.
    pub fn begin_request(&mut self) -> Option<UploadRequest> {
        match std::mem::take(&mut self.phase) {
            Phase::Idle { .. } => {
                self.phase = Phase::Idle {
                    error: Some(NO_FILE_MESSAGE.to_string()),
                };
                None
            }
            in_flight @ Phase::Requesting { .. } => {
                self.phase = in_flight;
                None
            }
            Phase::FileSelected { file }
            | Phase::Success { file, .. }
            | Phase::Failure { file, .. } => {
                let request = UploadRequest {
                    file: file.clone(),
                    length: self.length,
                };
                self.phase = Phase::Requesting { file };
                Some(request)
            }
        }
    }

    /// Applies the outcome of the in-flight request. The underlying error is
    /// logged; the session only keeps the generic message.
    pub fn finish(&mut self, outcome: Result<String, ClientError>) {
        let file = match std::mem::take(&mut self.phase) {
            Phase::Requesting { file } => file,
            other => {
                self.phase = other;
                return;
            }
        };

        self.phase = match outcome {
            Ok(summary) => Phase::Success { file, summary },
            Err(e) => {
                error!("Summary request failed: {}", e);
                Phase::Failure {
                    file,
                    error: REQUEST_FAILED_MESSAGE.to_string(),
                }
            }
        };
    }

    /// Drops the displayed summary, keeping the file.
    pub fn clear_summary(&mut self) {
        self.phase = match std::mem::take(&mut self.phase) {
            Phase::Success { file, .. } => Phase::FileSelected { file },
            other => other,
        };
    }

    /// Forgets the file entirely. Ignored while a request is in flight.
    pub fn remove_file(&mut self) {
        if !self.is_in_flight() {
            self.phase = Phase::default();
        }
    }

    /// Download payload for the current summary, if one is shown.
    #[must_use]
    pub fn export(&self, format: ExportFormat) -> Option<Export> {
        self.summary().map(|summary| Export::new(format, summary))
    }
}
