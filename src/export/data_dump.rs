//! Raw JSON dump of a profile.

use super::artifact::{DataUri, DownloadArtifact, ExportFileName};
use crate::profile::FlamegraphProfile;
use crate::utils::error::ExportError;
use log::debug;

/// Media type used for the dump, as browsers expect it
pub const DUMP_MIME_TYPE: &str = "text/json";

/// Serialize the whole profile into an inline `<export_name>.json` artifact
///
/// The dump is the compact serialization of the profile with every payload
/// field kept as loaded; parsing it back yields an equal profile.
///
/// # Errors
/// * `ExportError::InvalidExportName` - empty name or name with path separators
/// * `ExportError::SerializationFailed` - profile cannot be serialized
pub fn prepare_data_dump(
    profile: &FlamegraphProfile,
    export_name: &str,
) -> Result<DownloadArtifact, ExportError> {
    validate_export_name(export_name)?;

    let json = serde_json::to_string(profile)?;
    debug!("Serialized profile ({} bytes)", json.len());

    Ok(DownloadArtifact::inline(
        ExportFileName::new(export_name, "json"),
        DataUri::from_text(DUMP_MIME_TYPE, &json),
    ))
}

fn validate_export_name(name: &str) -> Result<(), ExportError> {
    if name.trim().is_empty() {
        return Err(ExportError::InvalidExportName("name is empty".to_string()));
    }

    if name.contains(&['/', '\\'][..]) {
        return Err(ExportError::InvalidExportName(format!(
            "'{}' contains a path separator",
            name
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_export_name() {
        assert!(validate_export_name("pyroscope_export").is_ok());
        assert!(validate_export_name("").is_err());
        assert!(validate_export_name("  ").is_err());
        assert!(validate_export_name("../dump").is_err());
    }
}
