use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use tokio::io::{AsyncRead, AsyncReadExt};

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// How [`StorageGuard::store`](super::StorageGuard::store) treats an existing target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Fail if the target already exists.
    CreateNew,
    /// Atomically replace an existing target.
    Replace,
}

/// An untrusted byte stream with the filename the client declared for it.
pub struct Upload {
    pub filename: String,
    /// Size announced by the client, checked before any byte is written.
    pub declared_size: Option<u64>,
    pub reader: BoxReader,
}

impl Upload {
    pub fn new(filename: impl Into<String>, reader: BoxReader) -> Self {
        Self {
            filename: filename.into(),
            declared_size: None,
            reader,
        }
    }

    pub fn with_declared_size(mut self, size: u64) -> Self {
        self.declared_size = Some(size);
        self
    }

    /// Wrap an in-memory buffer. The declared size is the buffer length.
    pub fn from_bytes(filename: impl Into<String>, data: Vec<u8>) -> Self {
        let size = data.len() as u64;
        Self::new(filename, Box::new(Cursor::new(data))).with_declared_size(size)
    }

    /// Open a local file as an upload, using its file name as the declared name.
    pub async fn open(path: &Path) -> std::io::Result<Self> {
        let file = tokio::fs::File::open(path).await?;
        let size = file.metadata().await?.len();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(filename, Box::new(file)).with_declared_size(size))
    }

    /// Returns `None` if the upload carries no bytes.
    ///
    /// A declared size of zero is trusted. Otherwise the first byte is read
    /// and put back in front of the stream.
    pub async fn non_empty(mut self) -> std::io::Result<Option<Self>> {
        if self.declared_size == Some(0) {
            return Ok(None);
        }

        let mut first = [0u8; 1];
        if self.reader.read(&mut first).await? == 0 {
            return Ok(None);
        }

        self.reader = Box::new(Cursor::new(first.to_vec()).chain(self.reader));
        Ok(Some(self))
    }
}

impl fmt::Debug for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upload")
            .field("filename", &self.filename)
            .field("declared_size", &self.declared_size)
            .finish_non_exhaustive()
    }
}

/// An upload whose name and target path passed validation. No bytes written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedUpload {
    pub original_name: String,
    pub sanitized_name: String,
    /// `{uuid}_{sanitized}`, shortened if needed to fit a filesystem name.
    pub storage_name: String,
    /// Absolute, normalized path below the upload root.
    pub path: PathBuf,
    pub declared_size: Option<u64>,
}

/// A file that was written below the upload root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub original_name: String,
    pub sanitized_name: String,
    pub storage_name: String,
    pub path: PathBuf,
    pub size: u64,
}
