use crate::profile::{collapse_profile, read_profile};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Validate a profile JSON file
pub fn validate_profile_file(file_path: PathBuf) -> Result<()> {
    println!("Validating profile: {}", file_path.display());

    let profile = read_profile(&file_path)
        .with_context(|| format!("Failed to read profile {}", file_path.display()))?;
    let stacks = collapse_profile(&profile).context("Invalid flamebearer payload")?;

    let metadata = &profile.metadata;
    println!("✓ Valid profile JSON");
    println!("  App:       {}", metadata.app_name);
    println!("  Range:     {} .. {}", metadata.start_time, metadata.end_time);
    println!("  Query:     {}", metadata.query);
    println!("  Max Nodes: {}", metadata.max_nodes);
    println!("  Format:    {}", metadata.format());
    println!("  Stacks:    {}", stacks.len());

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("Flamegraph Export v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Exports flamegraph profiles as snapshots, JSON dumps, pprof and html.");
}
