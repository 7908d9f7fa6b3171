//! Surface backed by an image file rendered elsewhere.

use super::{ImageFormat, RenderedSurface, SurfaceImage};
use crate::utils::error::SurfaceError;
use log::debug;
use std::path::{Path, PathBuf};

/// A PNG or SVG image already on disk
#[derive(Debug, Clone)]
pub struct ImageFileSurface {
    path: PathBuf,
}

impl ImageFileSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RenderedSurface for ImageFileSurface {
    fn capture(&self) -> Result<Option<SurfaceImage>, SurfaceError> {
        if !self.path.is_file() {
            debug!("Surface image not present: {}", self.path.display());
            return Ok(None);
        }

        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let format = ImageFormat::from_extension(ext)
            .ok_or_else(|| SurfaceError::UnsupportedImage(self.path.display().to_string()))?;

        let bytes = std::fs::read(&self.path)?;
        if bytes.is_empty() {
            debug!("Surface image is empty: {}", self.path.display());
            return Ok(None);
        }

        Ok(Some(SurfaceImage { format, bytes }))
    }
}
