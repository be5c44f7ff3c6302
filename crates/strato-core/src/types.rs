use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend selector used in configuration and by the provider factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Local,
    Memory,
    S3,
    Gcs,
    Azure,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Local => write!(f, "local"),
            ProviderKind::Memory => write!(f, "memory"),
            ProviderKind::S3 => write!(f, "s3"),
            ProviderKind::Gcs => write!(f, "gcs"),
            ProviderKind::Azure => write!(f, "azure"),
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = crate::error::StratoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(ProviderKind::Local),
            "memory" => Ok(ProviderKind::Memory),
            "s3" | "aws" => Ok(ProviderKind::S3),
            "gcs" | "gcp" | "google" => Ok(ProviderKind::Gcs),
            "azure" | "azure-blob" => Ok(ProviderKind::Azure),
            _ => Err(crate::error::StratoError::InvalidProvider(s.to_string())),
        }
    }
}

/// Well-known file kinds and their content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Jpeg,
    Png,
    Gif,
    Pdf,
    Txt,
    Html,
    Xml,
    Json,
    Mp4,
    Mp3,
    Zip,
    Csv,
    /// Default fallback.
    OctetStream,
}

impl FileKind {
    pub const fn content_type(&self) -> &'static str {
        match self {
            FileKind::Jpeg => "image/jpeg",
            FileKind::Png => "image/png",
            FileKind::Gif => "image/gif",
            FileKind::Pdf => "application/pdf",
            FileKind::Txt => "text/plain",
            FileKind::Html => "text/html",
            FileKind::Xml => "application/xml",
            FileKind::Json => "application/json",
            FileKind::Mp4 => "video/mp4",
            FileKind::Mp3 => "audio/mpeg",
            FileKind::Zip => "application/zip",
            FileKind::Csv => "text/csv",
            FileKind::OctetStream => "application/octet-stream",
        }
    }

    /// Guess from a file extension; unknown extensions fall back to
    /// `application/octet-stream`.
    pub fn from_extension(ext: &str) -> FileKind {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => FileKind::Jpeg,
            "png" => FileKind::Png,
            "gif" => FileKind::Gif,
            "pdf" => FileKind::Pdf,
            "txt" => FileKind::Txt,
            "html" | "htm" => FileKind::Html,
            "xml" => FileKind::Xml,
            "json" => FileKind::Json,
            "mp4" => FileKind::Mp4,
            "mp3" => FileKind::Mp3,
            "zip" => FileKind::Zip,
            "csv" => FileKind::Csv,
            _ => FileKind::OctetStream,
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.content_type())
    }
}
