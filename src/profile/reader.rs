//! Profile loading from disk.

use super::schema::FlamegraphProfile;
use crate::utils::error::ProfileError;
use log::debug;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read a flamegraph profile from a JSON file
///
/// **Public** - entry point for the CLI commands and tests
///
/// # Arguments
/// * `input_path` - Path to the exported flamebearer JSON
///
/// # Errors
/// * `ProfileError::ReadFailed` - File cannot be opened
/// * `ProfileError::JsonError` - File is not a flamebearer profile
pub fn read_profile(input_path: impl AsRef<Path>) -> Result<FlamegraphProfile, ProfileError> {
    let input_path = input_path.as_ref();

    debug!("Reading profile from: {}", input_path.display());

    let file = File::open(input_path)?;
    let profile: FlamegraphProfile = serde_json::from_reader(BufReader::new(file))?;

    debug!(
        "Profile loaded: app {}, range {} .. {}",
        profile.metadata.app_name, profile.metadata.start_time, profile.metadata.end_time
    );

    Ok(profile)
}

/// Parse a profile from an in-memory JSON string
pub fn parse_profile(json: &str) -> Result<FlamegraphProfile, ProfileError> {
    Ok(serde_json::from_str(json)?)
}
