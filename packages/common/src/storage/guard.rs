use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::StorageError;
use super::filename;
use super::upload::{BoxReader, PreparedUpload, StoredFile, Upload, WriteMode};
use crate::config::UploadConfig;

/// Directory below the root that holds in-flight writes.
const TEMP_DIR: &str = ".tmp";

/// Guards every filesystem access to the upload root.
///
/// Names are sanitized before they are joined onto the root, and every resolved
/// path is checked for containment after normalization, independently of how
/// it was derived.
#[derive(Debug, Clone)]
pub struct StorageGuard {
    /// Absolute, lexically normalized upload root.
    root: PathBuf,
    max_bytes: u64,
    /// Lowercase extensions without the leading dot.
    allowed_extensions: Vec<String>,
}

impl StorageGuard {
    /// Build a guard from configuration. Does not touch the filesystem.
    pub fn new(config: &UploadConfig) -> Result<Self, StorageError> {
        config.validate().map_err(StorageError::InvalidInput)?;
        let root = normalize(&std::path::absolute(&config.dir)?);
        Ok(Self {
            root,
            max_bytes: config.max_bytes,
            allowed_extensions: config.normalized_extensions(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// Create the upload root and its temp directory. Idempotent.
    pub async fn ensure_root_exists(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).await?;
        fs::create_dir_all(self.root.join(TEMP_DIR)).await?;
        info!(root = %self.root.display(), "Upload root ready");
        Ok(())
    }

    pub fn sanitize_filename(&self, original: &str) -> Result<String, StorageError> {
        filename::sanitize_filename(original, &self.allowed_extensions).inspect_err(|e| {
            debug!(filename = original, error = %e, "Rejected upload filename");
        })
    }

    pub fn make_storage_name(&self, original: &str) -> Result<String, StorageError> {
        let sanitized = self.sanitize_filename(original)?;
        filename::storage_name_for(Uuid::new_v4(), &sanitized)
    }

    /// Join `name` onto the root and return the normalized result.
    ///
    /// Fails with [`StorageError::SecurityViolation`] unless the normalized
    /// path lies strictly below the root.
    pub fn resolve_path(&self, name: &str) -> Result<PathBuf, StorageError> {
        let resolved = normalize(&self.root.join(name));
        if !self.is_below_root(&resolved) {
            warn!(
                name,
                resolved = %resolved.display(),
                "Resolved path escapes the upload root"
            );
            return Err(StorageError::SecurityViolation { path: resolved });
        }
        Ok(resolved)
    }

    /// Returns true if `path`, once made absolute and normalized, lies below the root.
    pub fn contains(&self, path: &Path) -> bool {
        self.contained_path(path).is_some()
    }

    /// Validate an upload's name and size and pick its target path. Writes nothing.
    pub fn prepare(
        &self,
        original_name: &str,
        declared_size: Option<u64>,
    ) -> Result<PreparedUpload, StorageError> {
        let sanitized_name = self.sanitize_filename(original_name)?;
        let storage_name = filename::storage_name_for(Uuid::new_v4(), &sanitized_name)?;
        let path = self.resolve_path(&storage_name)?;

        if let Some(size) = declared_size {
            if size > self.max_bytes {
                debug!(size, limit = self.max_bytes, "Rejected oversized upload");
                return Err(StorageError::PayloadTooLarge {
                    actual: size,
                    limit: self.max_bytes,
                });
            }
        }

        Ok(PreparedUpload {
            original_name: original_name.to_string(),
            sanitized_name,
            storage_name,
            path,
            declared_size,
        })
    }

    /// Write a prepared upload to its target path.
    pub async fn write(
        &self,
        prepared: PreparedUpload,
        reader: BoxReader,
        mode: WriteMode,
    ) -> Result<StoredFile, StorageError> {
        let size = self.store(reader, &prepared.path, mode).await?;
        Ok(StoredFile {
            original_name: prepared.original_name,
            sanitized_name: prepared.sanitized_name,
            storage_name: prepared.storage_name,
            path: prepared.path,
            size,
        })
    }

    /// Full pipeline: sanitize, name, resolve, check size, store.
    pub async fn ingest(&self, upload: Upload, mode: WriteMode) -> Result<StoredFile, StorageError> {
        let prepared = self.prepare(&upload.filename, upload.declared_size)?;
        self.write(prepared, upload.reader, mode).await
    }

    /// Stream `reader` into `path`, returning the number of bytes written.
    ///
    /// Bytes go to a temp file below the root first. The temp file is removed on
    /// any failure, including exceeding the size limit, so an aborted write never
    /// leaves a partial file behind.
    pub async fn store(
        &self,
        reader: BoxReader,
        path: &Path,
        mode: WriteMode,
    ) -> Result<u64, StorageError> {
        let target = self.contained_path(path).ok_or_else(|| {
            warn!(path = %path.display(), "Refusing to write outside the upload root");
            StorageError::SecurityViolation {
                path: path.to_path_buf(),
            }
        })?;

        let temp_path = self.temp_path();
        let size = match self.copy_bounded(reader, &temp_path).await {
            Ok(size) => size,
            Err(e) => {
                let _ = fs::remove_file(&temp_path).await;
                return Err(e);
            }
        };

        if let Err(e) = publish(&temp_path, &target, mode).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        debug!(path = %target.display(), size, "Stored file");
        Ok(size)
    }

    /// Delete `path` if it lies below the root. Never fails.
    ///
    /// Returns whether a file was removed. Missing files and filesystem errors
    /// are logged and reported as `false`.
    pub async fn delete_if_within_root(&self, path: &Path) -> bool {
        let Some(target) = self.contained_path(path) else {
            warn!(path = %path.display(), "Skipping delete outside the upload root");
            return false;
        };

        match fs::remove_file(&target).await {
            Ok(()) => {
                debug!(path = %target.display(), "Deleted stored file");
                true
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %target.display(), "Stored file already absent");
                false
            }
            Err(e) => {
                warn!(path = %target.display(), error = %e, "Failed to delete stored file");
                false
            }
        }
    }

    fn contained_path(&self, path: &Path) -> Option<PathBuf> {
        let absolute = std::path::absolute(path).ok()?;
        let normalized = normalize(&absolute);
        self.is_below_root(&normalized).then_some(normalized)
    }

    fn is_below_root(&self, normalized: &Path) -> bool {
        normalized != self.root && normalized.starts_with(&self.root)
    }

    fn temp_path(&self) -> PathBuf {
        self.root.join(TEMP_DIR).join(Uuid::new_v4().to_string())
    }

    async fn copy_bounded(&self, mut reader: BoxReader, temp_path: &Path) -> Result<u64, StorageError> {
        let mut temp_file = fs::File::create(temp_path).await?;
        let mut total_bytes: u64 = 0;
        let mut buf = vec![0u8; 64 * 1024]; // 64KB read buffer

        loop {
            let n = reader.read(&mut buf).await?;
            if n == 0 {
                break;
            }

            total_bytes += n as u64;
            if total_bytes > self.max_bytes {
                return Err(StorageError::PayloadTooLarge {
                    actual: total_bytes,
                    limit: self.max_bytes,
                });
            }

            temp_file.write_all(&buf[..n]).await?;
        }

        temp_file.flush().await?;
        Ok(total_bytes)
    }
}

/// Move a finished temp file to its final name.
async fn publish(temp_path: &Path, target: &Path, mode: WriteMode) -> std::io::Result<()> {
    match mode {
        WriteMode::Replace => fs::rename(temp_path, target).await,
        WriteMode::CreateNew => {
            // hard_link fails with AlreadyExists instead of clobbering the target.
            fs::hard_link(temp_path, target).await?;
            if let Err(e) = fs::remove_file(temp_path).await {
                warn!(path = %temp_path.display(), error = %e, "Failed to remove temp file");
            }
            Ok(())
        }
    }
}

/// Lexically resolve `.` and `..` components. `..` at the root stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}
