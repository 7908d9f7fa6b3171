//! Export command implementation.
//!
//! The export command:
//! 1. Loads the profile
//! 2. Builds the exporter (render URLs, file naming, output directory)
//! 3. Runs the requested export

use super::models::{ExportArgs, ExportKind};
use crate::download::{Delivery, DirectoryDownloader};
use crate::export::{
    Exporter, FilenameFormatter, RemoteFormat, RenderParams, RenderUrlBuilder,
};
use crate::profile::{read_profile, FlamegraphProfile};
use crate::surface::{FlamegraphSurface, ImageFileSurface, RenderedSurface};
use anyhow::{Context, Result};
use log::{info, warn};
use std::path::Path;
use std::time::Instant;
use url::Url;

/// Execute the export command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// Where the artifact was saved, or `None` when a snapshot had nothing to capture
///
/// # Errors
/// * Profile read/parse failures
/// * Invalid server URL
/// * Download or write failures (not for snapshots, which degrade to `None`)
pub fn execute_export(args: ExportArgs) -> Result<Option<Delivery>> {
    let start_time = Instant::now();

    // Step 1: Load profile
    let profile = match &args.profile {
        Some(path) => Some(load(path)?),
        None => None,
    };

    // Step 2: Build exporter
    let urls = RenderUrlBuilder::new(&args.server_url)
        .with_context(|| format!("Invalid server URL {}", args.server_url))?;
    let sink = DirectoryDownloader::new(&args.output_dir)
        .context("Failed to create download client")?;
    let exporter = Exporter::new(urls, sink)
        .with_filename_formatter(FilenameFormatter::new(args.month_numbering));

    info!(
        "Exporting {:?} into {}",
        args.kind,
        args.output_dir.display()
    );

    // Step 3: Export
    let delivery = match args.kind {
        ExportKind::Snapshot => {
            let surface: Option<Box<dyn RenderedSurface + '_>> =
                match (&args.surface_image, &profile) {
                    (Some(image), _) => Some(Box::new(ImageFileSurface::new(image))),
                    (None, Some(profile)) => Some(Box::new(
                        FlamegraphSurface::new(profile).with_config(args.surface_config.clone()),
                    )),
                    (None, None) => None,
                };

            let delivery = exporter.export_snapshot(surface.as_deref(), profile.as_ref());
            if delivery.is_none() {
                warn!("Nothing was captured, no snapshot written");
            }
            delivery
        }
        ExportKind::Json => {
            let profile = require(&profile)?;
            Some(
                exporter
                    .export_data_dump(profile, &args.export_name)
                    .context("Failed to export profile data")?,
            )
        }
        ExportKind::Pprof => {
            let profile = require(&profile)?;
            Some(
                exporter
                    .export_remote(profile, RemoteFormat::Pprof)
                    .context("Failed to export pprof")?,
            )
        }
        ExportKind::Html => {
            let profile = require(&profile)?;
            Some(
                exporter
                    .export_remote(profile, RemoteFormat::Html)
                    .context("Failed to export html report")?,
            )
        }
    };

    if let Some(delivery) = &delivery {
        info!(
            "✓ Export written to: {} ({} bytes)",
            delivery.path.display(),
            delivery.bytes
        );
    }

    let elapsed = start_time.elapsed();
    info!("Export completed in {:.2}s", elapsed.as_secs_f64());

    Ok(delivery)
}

/// Build the render URL for a profile without downloading anything
///
/// **Public** - backs the `url` subcommand
pub fn render_url_for(profile_path: &Path, server_url: &str, format: RemoteFormat) -> Result<Url> {
    let profile = load(profile_path)?;
    let urls = RenderUrlBuilder::new(server_url)
        .with_context(|| format!("Invalid server URL {}", server_url))?;

    Ok(urls.build(&RenderParams::from(&profile.metadata), format))
}

/// Validate export arguments
///
/// **Public** - can be called before execute_export for early validation
pub fn validate_args(args: &ExportArgs) -> Result<()> {
    // Validate server URL
    if args.server_url.is_empty() {
        anyhow::bail!("Server URL cannot be empty");
    }

    if !args.server_url.starts_with("http://") && !args.server_url.starts_with("https://") {
        anyhow::bail!("Server URL must start with http:// or https://");
    }

    // Every export except an image snapshot needs a profile
    if args.profile.is_none() && !(args.kind == ExportKind::Snapshot && args.surface_image.is_some())
    {
        anyhow::bail!("A profile file is required for {:?} export", args.kind);
    }

    if args.kind == ExportKind::Json {
        if args.export_name.trim().is_empty() {
            anyhow::bail!("Export name cannot be empty");
        }

        if args.export_name.contains(&['/', '\\'][..]) {
            anyhow::bail!("Export name cannot contain path separators");
        }
    }

    if args.surface_config.width == 0 {
        anyhow::bail!("Snapshot width must be greater than 0");
    }

    if args.surface_config.width > 20_000 {
        anyhow::bail!("Snapshot width is too large (max 20000)");
    }

    Ok(())
}

fn load(path: &Path) -> Result<FlamegraphProfile> {
    read_profile(path).with_context(|| format!("Failed to read profile {}", path.display()))
}

fn require(profile: &Option<FlamegraphProfile>) -> Result<&FlamegraphProfile> {
    profile
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("This export needs a profile"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn json_args() -> ExportArgs {
        ExportArgs {
            kind: ExportKind::Json,
            profile: Some(PathBuf::from("profile.json")),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_args_valid() {
        assert!(validate_args(&json_args()).is_ok());
    }

    #[test]
    fn test_validate_args_bad_scheme() {
        let args = ExportArgs {
            server_url: "ftp://localhost:4040".to_string(),
            ..json_args()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_snapshot_of_image_needs_no_profile() {
        let args = ExportArgs {
            kind: ExportKind::Snapshot,
            profile: None,
            surface_image: Some(PathBuf::from("canvas.png")),
            ..Default::default()
        };
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_remote_needs_profile() {
        let args = ExportArgs {
            kind: ExportKind::Pprof,
            profile: None,
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }
}
