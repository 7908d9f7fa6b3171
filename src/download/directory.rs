//! Saves artifacts into a local directory.
//!
//! Inline (`data:`) artifacts are decoded and written directly; URL artifacts
//! are fetched from the rendering server first. Every write goes through a
//! temporary file in the target directory, persisted only once complete.

use super::{Delivery, DownloadSink};
use crate::export::{ArtifactSource, DataUri, DownloadArtifact};
use crate::utils::config::{DEFAULT_HTTP_TIMEOUT, FALLBACK_DOWNLOAD_NAME};
use crate::utils::error::DownloadError;
use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_DISPOSITION;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use url::Url;

/// Download sink writing into `dir`
pub struct DirectoryDownloader {
    dir: PathBuf,
    client: Client,
}

impl DirectoryDownloader {
    /// Create a downloader with the default HTTP timeout
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, DownloadError> {
        Self::with_timeout(dir, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a downloader with a custom HTTP timeout
    pub fn with_timeout(dir: impl Into<PathBuf>, timeout: Duration) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DownloadError::RequestFailed)?;

        Ok(Self {
            dir: dir.into(),
            client,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn save_inline(&self, uri: &DataUri, name: Option<String>) -> Result<Delivery, DownloadError> {
        let bytes = uri.decode()?;
        let name = name.unwrap_or_else(|| FALLBACK_DOWNLOAD_NAME.to_string());
        self.save(&name, &bytes)
    }

    fn fetch(&self, url: &Url, name: Option<String>) -> Result<Delivery, DownloadError> {
        info!("Fetching {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(DownloadError::RequestFailed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let name = name
            .or_else(|| {
                response
                    .headers()
                    .get(CONTENT_DISPOSITION)
                    .and_then(|v| v.to_str().ok())
                    .and_then(disposition_filename)
            })
            .or_else(|| last_path_segment(url))
            .unwrap_or_else(|| FALLBACK_DOWNLOAD_NAME.to_string());

        let body = response.bytes().map_err(DownloadError::RequestFailed)?;
        self.save(&name, &body)
    }

    fn save(&self, name: &str, bytes: &[u8]) -> Result<Delivery, DownloadError> {
        let name = sanitize_file_name(name)?;

        if !self.dir.exists() {
            debug!("Creating output directory: {}", self.dir.display());
            std::fs::create_dir_all(&self.dir).map_err(|e| {
                DownloadError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    self.dir.display(),
                    e
                ))
            })?;
        }

        let target = self.dir.join(name);
        if target.is_dir() {
            return Err(DownloadError::InvalidPath(format!(
                "Path is a directory: {}",
                target.display()
            )));
        }

        // Dropped (and removed) on any early return below
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(bytes)?;
        tmp.flush()?;
        tmp.persist(&target)
            .map_err(|e| DownloadError::WriteFailed(e.error))?;

        info!("Saved {} ({} bytes)", target.display(), bytes.len());

        Ok(Delivery {
            path: target,
            bytes: bytes.len() as u64,
        })
    }
}

impl DownloadSink for DirectoryDownloader {
    fn trigger_download(&self, artifact: &DownloadArtifact) -> Result<Delivery, DownloadError> {
        match &artifact.source {
            ArtifactSource::DataUri(uri) => self.save_inline(uri, artifact.download_name()),
            ArtifactSource::Url(url) => self.fetch(url, artifact.download_name()),
        }
    }
}

/// Reduce a suggested name to a single safe path component
fn sanitize_file_name(name: &str) -> Result<&str, DownloadError> {
    let name = name
        .rsplit(&['/', '\\'][..])
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        return Err(DownloadError::InvalidPath(format!(
            "Unusable file name: '{}'",
            name
        )));
    }

    Ok(name)
}

/// `filename` parameter of a `Content-Disposition` header
fn disposition_filename(header: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|part| part.trim().strip_prefix("filename="))
        .map(|value| value.trim().trim_matches('"').to_string())
        .find(|value| !value.is_empty())
}

fn last_path_segment(url: &Url) -> Option<String> {
    url.path_segments()?
        .filter(|s| !s.is_empty())
        .last()
        .map(str::to_string)
}
