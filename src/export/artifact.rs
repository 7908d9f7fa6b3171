//! Download artifacts: a file name plus the bytes or URL behind it.

use crate::utils::error::DownloadError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt;
use url::Url;

/// Characters left unescaped by `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// An RFC 2397 `data:` URI holding the artifact content inline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri(String);

impl DataUri {
    /// Wrap UTF-8 text, percent-encoded (`data:<mime>;charset=utf-8,...`)
    pub fn from_text(mime_type: &str, text: &str) -> Self {
        Self(format!(
            "data:{};charset=utf-8,{}",
            mime_type,
            utf8_percent_encode(text, URI_COMPONENT)
        ))
    }

    /// Wrap binary content, base64-encoded (`data:<mime>;base64,...`)
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{};base64,{}", mime_type, BASE64.encode(bytes)))
    }

    /// Accept an already encoded data URI
    pub fn parse(uri: impl Into<String>) -> Result<Self, DownloadError> {
        let uri = uri.into();
        if !uri.starts_with("data:") || !uri.contains(',') {
            return Err(DownloadError::InvalidDataUri(truncate(&uri)));
        }
        Ok(Self(uri))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Media type without parameters
    pub fn mime_type(&self) -> &str {
        let header = self.header();
        header.split(';').next().unwrap_or(header)
    }

    /// Decode the payload back into bytes
    pub fn decode(&self) -> Result<Vec<u8>, DownloadError> {
        let payload = self.payload();

        if self.header().ends_with(";base64") {
            BASE64
                .decode(payload)
                .map_err(|e| DownloadError::InvalidDataUri(format!("bad base64 payload: {}", e)))
        } else {
            Ok(percent_decode_str(payload).collect())
        }
    }

    fn header(&self) -> &str {
        let rest = &self.0["data:".len()..];
        rest.split_once(',').map(|(header, _)| header).unwrap_or(rest)
    }

    fn payload(&self) -> &str {
        self.0.split_once(',').map(|(_, payload)| payload).unwrap_or("")
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn truncate(uri: &str) -> String {
    uri.chars().take(32).collect()
}

/// File name split into base and extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFileName {
    pub base: String,
    pub extension: String,
}

impl ExportFileName {
    pub fn new(base: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            extension: extension.into(),
        }
    }
}

impl fmt::Display for ExportFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.base, self.extension)
    }
}

/// Where the artifact content comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactSource {
    /// Content carried inline
    DataUri(DataUri),
    /// Content fetched from the rendering server
    Url(Url),
}

impl ArtifactSource {
    /// Value an anchor `href` would carry
    pub fn href(&self) -> &str {
        match self {
            Self::DataUri(uri) => uri.as_str(),
            Self::Url(url) => url.as_str(),
        }
    }
}

/// Everything needed to trigger a single download
///
/// `file_name` is `None` when the server response decides the saved name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    pub file_name: Option<ExportFileName>,
    pub source: ArtifactSource,
}

impl DownloadArtifact {
    pub fn inline(file_name: ExportFileName, uri: DataUri) -> Self {
        Self {
            file_name: Some(file_name),
            source: ArtifactSource::DataUri(uri),
        }
    }

    pub fn remote(file_name: Option<ExportFileName>, url: Url) -> Self {
        Self {
            file_name,
            source: ArtifactSource::Url(url),
        }
    }

    /// Full file name (`base.ext`), if one is set
    pub fn download_name(&self) -> Option<String> {
        self.file_name.as_ref().map(ToString::to_string)
    }
}
