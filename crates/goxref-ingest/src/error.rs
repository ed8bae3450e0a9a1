//! Error types for remote data access, parsing and resolution

use goxref_common::GoxrefError;

/// Result type for ingest operations
pub type Result<T> = std::result::Result<T, IngestError>;

/// Error types for goxref ingestion and lookups
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Download error: {0}")]
    Download(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No such ID type: `{0}`")]
    UnknownIdType(String),

    #[error("No GOA annotation file known for organism {0}")]
    UnknownOrganism(u32),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Common(#[from] GoxrefError),
}

impl IngestError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<std::string::FromUtf8Error> for IngestError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        IngestError::Parse(err.to_string())
    }
}
