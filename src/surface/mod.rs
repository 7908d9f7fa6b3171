//! Rendered visual surfaces the snapshot export reads pixels from.
//!
//! The exporter never owns a surface; callers hand one in explicitly.
//! Two surfaces ship with the crate:
//! - `FlamegraphSurface` renders the profile itself with inferno
//! - `ImageFileSurface` reads an image some other renderer already produced

pub mod file;
pub mod flamegraph;

pub use file::ImageFileSurface;
pub use flamegraph::{FlamegraphSurface, SurfaceConfig};

use crate::utils::error::SurfaceError;

/// Encoded image formats a surface can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "svg" => Some(Self::Svg),
            _ => None,
        }
    }
}

/// Current content of a surface, already encoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceImage {
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

/// Something that has been drawn and can be captured as an image
pub trait RenderedSurface {
    /// Capture the current content
    ///
    /// Returns `Ok(None)` when nothing has been rendered yet.
    fn capture(&self) -> Result<Option<SurfaceImage>, SurfaceError>;
}
