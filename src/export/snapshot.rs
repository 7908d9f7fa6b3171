//! Image snapshot of the rendered flamegraph.
//!
//! Capturing is best effort: a missing or blank surface yields no artifact
//! instead of an error.

use super::artifact::{DataUri, DownloadArtifact, ExportFileName};
use super::filename::FilenameFormatter;
use crate::profile::FlamegraphProfile;
use crate::surface::RenderedSurface;
use crate::utils::config::FALLBACK_SNAPSHOT_NAME;
use log::{debug, warn};

/// Capture `surface` as an inline image artifact
///
/// The file is named after the profile (`<appName>_<DD>_<MM>_<YYYY>.<ext>`),
/// or `flamegraph.<ext>` when no profile is given. Returns `None` when there
/// is no surface, nothing has been rendered, or capturing failed.
pub fn prepare_snapshot(
    formatter: &FilenameFormatter,
    surface: Option<&dyn RenderedSurface>,
    profile: Option<&FlamegraphProfile>,
) -> Option<DownloadArtifact> {
    let Some(surface) = surface else {
        warn!("No surface to snapshot, skipping export");
        return None;
    };

    let image = match surface.capture() {
        Ok(Some(image)) => image,
        Ok(None) => {
            warn!("Surface has not been rendered yet, skipping export");
            return None;
        }
        Err(e) => {
            warn!("Failed to capture surface: {}", e);
            return None;
        }
    };

    let extension = image.format.extension();
    let file_name = match profile {
        Some(profile) => formatter.file_name(&profile.metadata, extension),
        None => ExportFileName::new(FALLBACK_SNAPSHOT_NAME, extension),
    };

    debug!(
        "Snapshot {} ({} bytes of {})",
        file_name,
        image.bytes.len(),
        image.format.mime_type()
    );

    let uri = DataUri::from_bytes(image.format.mime_type(), &image.bytes);
    Some(DownloadArtifact::inline(file_name, uri))
}
