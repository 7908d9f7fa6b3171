//! Server-rendered exports (`pprof`, `html`).
//!
//! Both formats point the download at the render endpoint. Only `html` names
//! the file locally; a `pprof` download keeps whatever name the server's
//! response assigns.

use super::artifact::DownloadArtifact;
use super::filename::FilenameFormatter;
use super::render_url::{RemoteFormat, RenderParams, RenderUrlBuilder};
use crate::profile::FlamegraphProfile;
use log::debug;

/// Build the artifact for a server-rendered export of `profile`
pub fn prepare_remote(
    urls: &RenderUrlBuilder,
    formatter: &FilenameFormatter,
    profile: &FlamegraphProfile,
    kind: RemoteFormat,
) -> DownloadArtifact {
    let url = urls.build(&RenderParams::from(&profile.metadata), kind);

    let file_name = match kind {
        RemoteFormat::Pprof => None,
        RemoteFormat::Html => Some(formatter.file_name(&profile.metadata, "html")),
    };

    debug!("Remote {} export from {}", kind, url);

    DownloadArtifact::remote(file_name, url)
}
