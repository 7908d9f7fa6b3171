//! Flamegraph profile schema.
//!
//! Mirrors the flamebearer JSON document produced by the profiling server.
//! Only the metadata needed for exporting is typed; every other field is kept
//! verbatim so a profile survives a load/serialize cycle unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Time range and query metadata attached to a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMetadata {
    /// Start of the profiled range (Unix seconds on the wire)
    #[serde(with = "chrono::serde::ts_seconds")]
    pub start_time: DateTime<Utc>,

    /// End of the profiled range (Unix seconds on the wire)
    #[serde(with = "chrono::serde::ts_seconds")]
    pub end_time: DateTime<Utc>,

    /// Application the profile belongs to
    pub app_name: String,

    /// Query the profile was selected with
    pub query: String,

    /// Node-count cap used when the profile was rendered
    pub max_nodes: u64,

    /// Remaining metadata (`format`, `spyName`, `units`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProfileMetadata {
    /// Flamebearer layout name, `"single"` when absent
    pub fn format(&self) -> &str {
        self.extra
            .get("format")
            .and_then(Value::as_str)
            .unwrap_or("single")
    }

    /// Sample unit name, `"samples"` when absent
    pub fn units(&self) -> &str {
        self.extra
            .get("units")
            .and_then(Value::as_str)
            .filter(|units| !units.is_empty())
            .unwrap_or("samples")
    }
}

/// A flamegraph profile: metadata plus an opaque payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlamegraphProfile {
    pub metadata: ProfileMetadata,

    /// Tree/sample data (`flamebearer`, `timeline`, `version`, ...)
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl FlamegraphProfile {
    pub fn app_name(&self) -> &str {
        &self.metadata.app_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample_json() -> Value {
        json!({
            "version": 1,
            "flamebearer": {
                "names": ["total", "main"],
                "levels": [[0, 10, 0, 0], [0, 10, 10, 1]],
                "numTicks": 10,
                "maxSelf": 10
            },
            "metadata": {
                "format": "single",
                "spyName": "gospy",
                "sampleRate": 100,
                "units": "samples",
                "appName": "myapp.cpu",
                "startTime": 1672876800,
                "endTime": 1672963200,
                "query": "myapp.cpu{}",
                "maxNodes": 1024
            },
            "timeline": null
        })
    }

    #[test]
    fn test_metadata_fields() {
        let profile: FlamegraphProfile = serde_json::from_value(sample_json()).unwrap();

        assert_eq!(profile.app_name(), "myapp.cpu");
        assert_eq!(profile.metadata.query, "myapp.cpu{}");
        assert_eq!(profile.metadata.max_nodes, 1024);
        assert_eq!(
            profile.metadata.start_time,
            Utc.with_ymd_and_hms(2023, 1, 5, 0, 0, 0).unwrap()
        );
        assert_eq!(profile.metadata.format(), "single");
        assert_eq!(profile.metadata.units(), "samples");
    }

    #[test]
    fn test_unknown_fields_survive_serialization() {
        let original = sample_json();
        let profile: FlamegraphProfile = serde_json::from_value(original.clone()).unwrap();

        let back = serde_json::to_value(&profile).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_missing_format_defaults_to_single() {
        let mut value = sample_json();
        value["metadata"].as_object_mut().unwrap().remove("format");
        value["metadata"].as_object_mut().unwrap().remove("units");

        let profile: FlamegraphProfile = serde_json::from_value(value).unwrap();
        assert_eq!(profile.metadata.format(), "single");
        assert_eq!(profile.metadata.units(), "samples");
    }
}
