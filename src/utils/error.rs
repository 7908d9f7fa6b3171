//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while loading or interpreting a profile
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Failed to read profile: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid flamebearer payload: {0}")]
    InvalidPayload(String),

    #[error("Unsupported flamebearer format: {0}")]
    UnsupportedFormat(String),
}

/// Errors that can occur while capturing a rendered surface
#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("Failed to decode profile for rendering: {0}")]
    Profile(#[from] ProfileError),

    #[error("Flamegraph rendering failed: {0}")]
    RenderFailed(String),

    #[error("Unsupported image type: {0}")]
    UnsupportedImage(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors that can occur while delivering an artifact
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Malformed data URI: {0}")]
    InvalidDataUri(String),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),
}

/// Errors surfaced by the exporters
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Invalid server URL: {0}")]
    InvalidServerUrl(#[from] url::ParseError),

    #[error("Server URL cannot carry a render path: {0}")]
    UnsupportedServerUrl(String),

    #[error("Invalid export name: {0}")]
    InvalidExportName(String),

    #[error("Failed to serialize profile: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Download failed: {0}")]
    Download(#[from] DownloadError),
}
