//! Exporter facade handed to the UI layer.

use super::data_dump::prepare_data_dump;
use super::filename::FilenameFormatter;
use super::remote::prepare_remote;
use super::render_url::{RemoteFormat, RenderUrlBuilder};
use super::snapshot::prepare_snapshot;
use crate::download::{Delivery, DownloadSink};
use crate::profile::FlamegraphProfile;
use crate::surface::RenderedSurface;
use crate::utils::error::ExportError;
use log::{info, warn};

/// One export action, as chosen from the export menu
pub enum ExportRequest<'a> {
    Snapshot {
        surface: Option<&'a dyn RenderedSurface>,
        profile: Option<&'a FlamegraphProfile>,
    },
    DataDump {
        profile: &'a FlamegraphProfile,
        export_name: &'a str,
    },
    Remote {
        profile: &'a FlamegraphProfile,
        kind: RemoteFormat,
    },
}

/// Runs exports against a download sink
pub struct Exporter<S> {
    urls: RenderUrlBuilder,
    filenames: FilenameFormatter,
    sink: S,
}

impl<S: DownloadSink> Exporter<S> {
    pub fn new(urls: RenderUrlBuilder, sink: S) -> Self {
        Self {
            urls,
            filenames: FilenameFormatter::default(),
            sink,
        }
    }

    pub fn with_filename_formatter(mut self, filenames: FilenameFormatter) -> Self {
        self.filenames = filenames;
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn urls(&self) -> &RenderUrlBuilder {
        &self.urls
    }

    pub fn filenames(&self) -> &FilenameFormatter {
        &self.filenames
    }

    /// Download an image of `surface`
    ///
    /// Never fails: a missing surface, a blank surface or a failed download
    /// are logged and reported as `None`.
    pub fn export_snapshot(
        &self,
        surface: Option<&dyn RenderedSurface>,
        profile: Option<&FlamegraphProfile>,
    ) -> Option<Delivery> {
        let artifact = prepare_snapshot(&self.filenames, surface, profile)?;

        match self.sink.trigger_download(&artifact) {
            Ok(delivery) => {
                info!("Snapshot exported to {}", delivery.path.display());
                Some(delivery)
            }
            Err(e) => {
                warn!("Snapshot download failed: {}", e);
                None
            }
        }
    }

    /// Download the whole profile as `<export_name>.json`
    pub fn export_data_dump(
        &self,
        profile: &FlamegraphProfile,
        export_name: &str,
    ) -> Result<Delivery, ExportError> {
        let artifact = prepare_data_dump(profile, export_name)?;
        let delivery = self.sink.trigger_download(&artifact)?;

        info!("Profile data exported to {}", delivery.path.display());
        Ok(delivery)
    }

    /// Download a server-rendered `pprof` or `html` export
    pub fn export_remote(
        &self,
        profile: &FlamegraphProfile,
        kind: RemoteFormat,
    ) -> Result<Delivery, ExportError> {
        let artifact = prepare_remote(&self.urls, &self.filenames, profile, kind);
        let delivery = self.sink.trigger_download(&artifact)?;

        info!("{} export saved to {}", kind, delivery.path.display());
        Ok(delivery)
    }

    /// Run any export request
    ///
    /// Snapshot requests resolve to `Ok(None)` when nothing was captured.
    pub fn export(&self, request: ExportRequest<'_>) -> Result<Option<Delivery>, ExportError> {
        match request {
            ExportRequest::Snapshot { surface, profile } => {
                Ok(self.export_snapshot(surface, profile))
            }
            ExportRequest::DataDump {
                profile,
                export_name,
            } => self.export_data_dump(profile, export_name).map(Some),
            ExportRequest::Remote { profile, kind } => self.export_remote(profile, kind).map(Some),
        }
    }
}
