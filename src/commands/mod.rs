//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod export;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use export::{execute_export, render_url_for, validate_args};
pub use models::{ExportArgs, ExportKind};
pub use utils::{display_version, validate_profile_file};
