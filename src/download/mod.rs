//! Download delivery.
//!
//! A `DownloadSink` is the platform's "save this as a file" capability. The
//! exporters only build artifacts; sinks turn them into files.

pub mod directory;

pub use directory::DirectoryDownloader;

use crate::export::DownloadArtifact;
use crate::utils::error::DownloadError;
use std::path::PathBuf;

/// Result of a completed download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Where the artifact ended up
    pub path: PathBuf,
    /// Number of bytes written
    pub bytes: u64,
}

/// Triggers a download for a prepared artifact
///
/// Implementations must release every transient resource they acquire,
/// whether the download succeeds or not.
pub trait DownloadSink {
    fn trigger_download(&self, artifact: &DownloadArtifact) -> Result<Delivery, DownloadError>;
}

impl<T: DownloadSink + ?Sized> DownloadSink for &T {
    fn trigger_download(&self, artifact: &DownloadArtifact) -> Result<Delivery, DownloadError> {
        (**self).trigger_download(artifact)
    }
}
