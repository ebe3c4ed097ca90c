use common::storage::StorageError;
use sea_orm::DbErr;
use thiserror::Error;

/// Failure of a material lifecycle operation.
///
/// Every failure path maps to exactly one variant; [`MaterialError::code`] gives
/// the boundary layer a stable identifier to translate.
#[derive(Debug, Error)]
pub enum MaterialError {
    /// Empty or malformed filename, disallowed extension.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A path resolved outside the upload root.
    #[error("security violation: {0}")]
    SecurityViolation(String),

    #[error("payload too large: {actual} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { actual: u64, limit: u64 },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// Writing the primary file failed.
    #[error("io failure: {0}")]
    IoFailure(#[source] std::io::Error),

    /// The record store collaborator failed.
    #[error("persistence error: {0}")]
    Persistence(#[from] DbErr),
}

impl MaterialError {
    pub fn material_not_found(id: i32) -> Self {
        Self::NotFound {
            entity: "Material",
            id,
        }
    }

    pub fn user_not_found(id: i32) -> Self {
        Self::NotFound { entity: "User", id }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::SecurityViolation(_) => "SECURITY_VIOLATION",
            Self::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::IoFailure(_) => "IO_FAILURE",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }
}

impl From<StorageError> for MaterialError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidInput(msg) => Self::InvalidInput(msg),
            StorageError::SecurityViolation { path } => {
                Self::SecurityViolation(format!("path escapes the upload root: {}", path.display()))
            }
            StorageError::PayloadTooLarge { actual, limit } => {
                Self::PayloadTooLarge { actual, limit }
            }
            StorageError::Io(e) => Self::IoFailure(e),
        }
    }
}
