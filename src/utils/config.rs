//! Configuration and constants for the exporter and CLI.

use std::time::Duration;

/// Default rendering server (local Pyroscope instance)
pub const DEFAULT_SERVER_URL: &str = "http://localhost:4040";

/// Path segment of the server-side rendering endpoint
pub const RENDER_PATH: &str = "render";

/// Default timeout for remote render downloads
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Export name used by the JSON dump when the caller does not supply one
pub const DEFAULT_EXPORT_NAME: &str = "pyroscope_export";

/// Base file name for snapshots taken without a profile
pub const FALLBACK_SNAPSHOT_NAME: &str = "flamegraph";

/// File name used when neither the caller nor the server names a download
pub const FALLBACK_DOWNLOAD_NAME: &str = "download";

/// Default output directory for saved artifacts
pub const DEFAULT_OUTPUT_DIR: &str = "exports";

/// Default snapshot width in pixels
pub const DEFAULT_SNAPSHOT_WIDTH: usize = 1200;

// Query parameter names understood by the render endpoint
pub const PARAM_FROM: &str = "from";
pub const PARAM_UNTIL: &str = "until";
pub const PARAM_QUERY: &str = "query";
pub const PARAM_MAX_NODES: &str = "maxNodes";
pub const PARAM_FORMAT: &str = "format";
