//! Front-end orchestration: session state, upload transport, export

pub mod api;
pub mod export;
pub mod session;

pub use api::{ClientError, SummarizeClient};
pub use export::{Export, ExportFormat};
pub use session::{Phase, SelectedFile, Session, UploadRequest};
