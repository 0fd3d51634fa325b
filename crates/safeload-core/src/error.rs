use std::path::PathBuf;

use safeload_document::DocumentError;

#[derive(Debug, thiserror::Error)]
pub enum SafeLoaderError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("{0} does not implement lazy_load()")]
    LazyLoadUnsupported(String),

    #[error("document loading failed: {0}")]
    Document(#[from] DocumentError),
}

/// Failure to deliver a report. Logged by the wrapper, never surfaced.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected HTTP status {status} from {endpoint}")]
    UnexpectedStatus { endpoint: &'static str, status: u16 },
}

#[derive(Debug, thiserror::Error)]
pub enum SourceSizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a regular file or directory: {}", .0.display())]
    NotFileOrDirectory(PathBuf),
}
