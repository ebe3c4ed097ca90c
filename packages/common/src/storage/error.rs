use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while validating or storing an uploaded file.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Empty filename, missing or disallowed extension.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A resolved path does not stay below the upload root.
    #[error("path escapes the upload root: {}", path.display())]
    SecurityViolation { path: PathBuf },

    /// The upload exceeds the configured size limit.
    #[error("file exceeds size limit ({actual} > {limit} bytes)")]
    PayloadTooLarge { actual: u64, limit: u64 },

    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
}
