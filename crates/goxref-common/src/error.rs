//! Error types shared across goxref crates

use thiserror::Error;

/// Result type alias for common operations
pub type Result<T> = std::result::Result<T, GoxrefError>;

/// Main error type for the common crate
#[derive(Error, Debug)]
pub enum GoxrefError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown aspect: {0}")]
    UnknownAspect(String),

    #[error("Unknown relation kind: {0}")]
    UnknownRelation(String),
}
