//! Render endpoint URL construction.
//!
//! The server renders a profile in another format when asked through
//! `GET <base>/render?from=..&until=..&query=..&maxNodes=..&format=..`.
//! Building the URL never touches the network.

use crate::profile::ProfileMetadata;
use crate::utils::config::{
    PARAM_FORMAT, PARAM_FROM, PARAM_MAX_NODES, PARAM_QUERY, PARAM_UNTIL, RENDER_PATH,
};
use crate::utils::error::ExportError;
use chrono::{DateTime, Utc};
use log::debug;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Server-side rendering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteFormat {
    /// Binary pprof document
    Pprof,
    /// Standalone HTML report
    Html,
}

impl RemoteFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pprof => "pprof",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for RemoteFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RemoteFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pprof" => Ok(Self::Pprof),
            "html" => Ok(Self::Html),
            other => Err(format!("unknown render format '{}' (expected pprof or html)", other)),
        }
    }
}

/// Query parameters of a render request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderParams<'a> {
    pub from: DateTime<Utc>,
    pub until: DateTime<Utc>,
    pub query: &'a str,
    pub max_nodes: u64,
}

impl<'a> From<&'a ProfileMetadata> for RenderParams<'a> {
    fn from(metadata: &'a ProfileMetadata) -> Self {
        Self {
            from: metadata.start_time,
            until: metadata.end_time,
            query: &metadata.query,
            max_nodes: metadata.max_nodes,
        }
    }
}

/// Builds render URLs against a fixed server
#[derive(Debug, Clone)]
pub struct RenderUrlBuilder {
    endpoint: Url,
}

impl RenderUrlBuilder {
    /// Create a builder for `server_url`
    ///
    /// # Errors
    /// * `ExportError::InvalidServerUrl` - not a parseable URL
    /// * `ExportError::UnsupportedServerUrl` - not http(s), or cannot carry a path
    pub fn new(server_url: &str) -> Result<Self, ExportError> {
        let mut endpoint = Url::parse(server_url)?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ExportError::UnsupportedServerUrl(server_url.to_string()));
        }

        endpoint
            .path_segments_mut()
            .map_err(|_| ExportError::UnsupportedServerUrl(server_url.to_string()))?
            .pop_if_empty()
            .push(RENDER_PATH);
        endpoint.set_query(None);
        endpoint.set_fragment(None);

        debug!("Render endpoint: {}", endpoint);

        Ok(Self { endpoint })
    }

    /// Render endpoint without query parameters
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build the render URL; `format` is always the last parameter
    pub fn build(&self, params: &RenderParams<'_>, format: RemoteFormat) -> Url {
        let mut url = self.endpoint.clone();

        url.query_pairs_mut()
            .append_pair(PARAM_FROM, &params.from.timestamp().to_string())
            .append_pair(PARAM_UNTIL, &params.until.timestamp().to_string())
            .append_pair(PARAM_QUERY, params.query)
            .append_pair(PARAM_MAX_NODES, &params.max_nodes.to_string())
            .append_pair(PARAM_FORMAT, format.as_str());

        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn params(query: &str) -> RenderParams<'_> {
        RenderParams {
            from: Utc.timestamp_opt(1_672_876_800, 0).unwrap(),
            until: Utc.timestamp_opt(1_672_963_200, 0).unwrap(),
            query,
            max_nodes: 1024,
        }
    }

    #[test]
    fn test_build_pprof_url() {
        let builder = RenderUrlBuilder::new("http://localhost:4040").unwrap();
        let url = builder.build(&params("myapp.cpu{}"), RemoteFormat::Pprof);

        assert_eq!(
            url.as_str(),
            "http://localhost:4040/render?from=1672876800&until=1672963200&query=myapp.cpu%7B%7D&maxNodes=1024&format=pprof"
        );
    }

    #[test]
    fn test_base_path_is_kept() {
        let builder = RenderUrlBuilder::new("https://example.com/pyroscope/").unwrap();
        assert_eq!(builder.endpoint().as_str(), "https://example.com/pyroscope/render");

        let builder = RenderUrlBuilder::new("https://example.com/pyroscope").unwrap();
        assert_eq!(builder.endpoint().as_str(), "https://example.com/pyroscope/render");
    }

    #[test]
    fn test_base_query_is_dropped() {
        let builder = RenderUrlBuilder::new("http://localhost:4040/?format=html#x").unwrap();
        let url = builder.build(&params("q"), RemoteFormat::Pprof);

        let formats: Vec<_> = url.query_pairs().filter(|(k, _)| k == "format").collect();
        assert_eq!(formats.len(), 1);
        assert!(url.fragment().is_none());
    }

    #[test]
    fn test_rejects_non_http_server() {
        assert!(matches!(
            RenderUrlBuilder::new("ftp://localhost"),
            Err(ExportError::UnsupportedServerUrl(_))
        ));
        assert!(matches!(
            RenderUrlBuilder::new("not a url"),
            Err(ExportError::InvalidServerUrl(_))
        ));
    }

    #[test]
    fn test_remote_format_from_str() {
        assert_eq!("pprof".parse::<RemoteFormat>().unwrap(), RemoteFormat::Pprof);
        assert_eq!("HTML".parse::<RemoteFormat>().unwrap(), RemoteFormat::Html);
        assert!("svg".parse::<RemoteFormat>().is_err());
    }
}
