mod error;
mod guard;
mod upload;

pub mod filename;

pub use error::StorageError;
pub use guard::StorageGuard;
pub use upload::{BoxReader, PreparedUpload, StoredFile, Upload, WriteMode};
