use crate::export::MonthNumbering;
use crate::surface::SurfaceConfig;
use crate::utils::config::{DEFAULT_EXPORT_NAME, DEFAULT_OUTPUT_DIR, DEFAULT_SERVER_URL};
use std::path::PathBuf;

/// Which artifact the export command produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Snapshot,
    Json,
    Pprof,
    Html,
}

/// Arguments for the export command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ExportArgs {
    /// Artifact to produce
    pub kind: ExportKind,

    /// Flamebearer profile JSON (optional only for snapshots of an image)
    pub profile: Option<PathBuf>,

    /// Directory downloads are saved into
    pub output_dir: PathBuf,

    /// Rendering server base URL
    pub server_url: String,

    /// Base name for the JSON dump
    pub export_name: String,

    /// Pre-rendered image to snapshot instead of rendering the profile
    pub surface_image: Option<PathBuf>,

    /// Flamegraph rendering options for snapshots
    pub surface_config: SurfaceConfig,

    /// Month numbering in generated file names
    pub month_numbering: MonthNumbering,
}

impl Default for ExportArgs {
    fn default() -> Self {
        Self {
            kind: ExportKind::Json,
            profile: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            server_url: DEFAULT_SERVER_URL.to_string(),
            export_name: DEFAULT_EXPORT_NAME.to_string(),
            surface_image: None,
            surface_config: SurfaceConfig::default(),
            month_numbering: MonthNumbering::default(),
        }
    }
}
