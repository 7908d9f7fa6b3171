//! Export-format logic.
//!
//! Turns a flamegraph profile (and, for snapshots, a rendered surface) into a
//! named download artifact:
//! - `snapshot` - image of the rendered surface, inline
//! - `data_dump` - full profile as JSON, inline
//! - `remote` - server-rendered `pprof` / `html`, by URL
//!
//! # Example
//! ```ignore
//! use flamegraph_export::download::DirectoryDownloader;
//! use flamegraph_export::export::{Exporter, RemoteFormat, RenderUrlBuilder};
//!
//! let urls = RenderUrlBuilder::new("http://localhost:4040")?;
//! let exporter = Exporter::new(urls, DirectoryDownloader::new("exports")?);
//! exporter.export_remote(&profile, RemoteFormat::Html)?;
//! ```

pub mod artifact;
pub mod data_dump;
pub mod exporter;
pub mod filename;
pub mod remote;
pub mod render_url;
pub mod snapshot;

// Public API exports
pub use artifact::{ArtifactSource, DataUri, DownloadArtifact, ExportFileName};
pub use data_dump::prepare_data_dump;
pub use exporter::{ExportRequest, Exporter};
pub use filename::{FilenameFormatter, MonthNumbering};
pub use remote::prepare_remote;
pub use render_url::{RemoteFormat, RenderParams, RenderUrlBuilder};
pub use snapshot::prepare_snapshot;
