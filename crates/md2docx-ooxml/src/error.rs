//! Error types for OOXML packaging

use thiserror::Error;

/// Errors that can occur while packaging a document
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// Error writing the ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for OOXML packaging operations
pub type Result<T> = std::result::Result<T, OoxmlError>;
