use std::path::PathBuf;

use serde::Deserialize;

/// Default allow-list of upload extensions (without the leading dot).
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "txt", "jpg", "jpeg", "png", "mp4", "avi", "mov",
];

/// Upload storage configuration.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct UploadConfig {
    /// Root directory for stored material files. Default: "upload".
    #[serde(default = "default_upload_dir")]
    pub dir: PathBuf,
    /// Per-file size ceiling in bytes. Default: 50 MiB.
    #[serde(default = "default_max_bytes", alias = "maxBytes", alias = "maxbytes")]
    pub max_bytes: u64,
    /// Case-insensitive extension allow-list. Entries may carry a leading dot.
    #[serde(
        default = "default_allowed_extensions",
        alias = "allowedExtensions",
        alias = "allowedextensions"
    )]
    pub allowed_extensions: Vec<String>,
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("upload")
}
fn default_max_bytes() -> u64 {
    50 * 1024 * 1024
}
fn default_allowed_extensions() -> Vec<String> {
    DEFAULT_ALLOWED_EXTENSIONS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            max_bytes: default_max_bytes(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

impl UploadConfig {
    /// Allow-list normalized to lowercase, dot-less extensions.
    pub fn normalized_extensions(&self) -> Vec<String> {
        let mut exts: Vec<String> = self
            .allowed_extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        exts.sort();
        exts.dedup();
        exts
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_bytes == 0 {
            return Err("upload.max_bytes must be greater than 0".into());
        }
        if self.normalized_extensions().is_empty() {
            return Err("upload.allowed_extensions must list at least one extension".into());
        }
        if self.dir.as_os_str().is_empty() {
            return Err("upload.dir must not be empty".into());
        }
        Ok(())
    }
}
