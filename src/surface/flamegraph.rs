//! Flamegraph surface rendered with inferno.
//!
//! Decodes the profile's flamebearer payload into collapsed stacks and feeds
//! them to `inferno::flamegraph`, producing an SVG snapshot.

use super::{ImageFormat, RenderedSurface, SurfaceImage};
use crate::profile::{collapse_profile, FlamegraphProfile};
use crate::utils::config::DEFAULT_SNAPSHOT_WIDTH;
use crate::utils::error::SurfaceError;
use inferno::flamegraph::{self, Options};
use log::{debug, info};

/// Flamegraph rendering configuration
#[derive(Debug, Clone)]
pub struct SurfaceConfig {
    /// Title drawn above the graph (defaults to the app name)
    pub title: Option<String>,
    pub width: usize,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            title: None,
            width: DEFAULT_SNAPSHOT_WIDTH,
        }
    }
}

impl SurfaceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

/// A flamegraph of one profile, drawn on demand
pub struct FlamegraphSurface<'a> {
    profile: &'a FlamegraphProfile,
    config: SurfaceConfig,
}

impl<'a> FlamegraphSurface<'a> {
    pub fn new(profile: &'a FlamegraphProfile) -> Self {
        Self {
            profile,
            config: SurfaceConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SurfaceConfig) -> Self {
        self.config = config;
        self
    }

    /// Render the SVG markup, `None` if the profile has no samples
    pub fn render_svg(&self) -> Result<Option<String>, SurfaceError> {
        let stacks = collapse_profile(self.profile)?;
        if stacks.is_empty() {
            debug!("Profile has no samples, nothing to draw");
            return Ok(None);
        }

        info!("Rendering flamegraph with {} stacks", stacks.len());

        let lines: Vec<String> = stacks.iter().map(|s| s.to_line()).collect();

        let mut options = Options::default();
        options.title = self
            .config
            .title
            .clone()
            .unwrap_or_else(|| self.profile.metadata.app_name.clone());
        options.image_width = Some(self.config.width);
        options.count_name = self.profile.metadata.units().to_string();

        let mut svg = Vec::new();
        flamegraph::from_lines(&mut options, lines.iter().map(String::as_str), &mut svg)
            .map_err(|e| SurfaceError::RenderFailed(e.to_string()))?;

        let svg = String::from_utf8(svg).map_err(|e| SurfaceError::RenderFailed(e.to_string()))?;
        debug!("Flamegraph rendered ({} bytes)", svg.len());

        Ok(Some(svg))
    }
}

impl RenderedSurface for FlamegraphSurface<'_> {
    fn capture(&self) -> Result<Option<SurfaceImage>, SurfaceError> {
        Ok(self.render_svg()?.map(|svg| SurfaceImage {
            format: ImageFormat::Svg,
            bytes: svg.into_bytes(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::parse_profile;

    fn profile(levels: &str) -> FlamegraphProfile {
        parse_profile(&format!(
            r#"{{
                "flamebearer": {{"names": ["total", "main", "work"], "levels": {}, "numTicks": 10, "maxSelf": 6}},
                "metadata": {{"format": "single", "units": "samples", "appName": "svc.cpu",
                              "startTime": 1672876800, "endTime": 1672963200, "query": "svc.cpu{{}}", "maxNodes": 1024}}
            }}"#,
            levels
        ))
        .unwrap()
    }

    #[test]
    fn test_render_svg() {
        let profile = profile("[[0, 10, 0, 0], [0, 10, 4, 1], [0, 6, 6, 2]]");
        let surface = FlamegraphSurface::new(&profile)
            .with_config(SurfaceConfig::new().with_title("CPU").with_width(800));

        let image = surface.capture().unwrap().unwrap();
        let svg = String::from_utf8(image.bytes).unwrap();

        assert_eq!(image.format, ImageFormat::Svg);
        assert!(svg.contains("<svg"));
        assert!(svg.contains("CPU"));
        assert!(svg.contains("work"));
    }

    #[test]
    fn test_empty_profile_is_not_rendered() {
        let profile = profile("[]");
        let surface = FlamegraphSurface::new(&profile);

        assert!(surface.capture().unwrap().is_none());
    }
}
