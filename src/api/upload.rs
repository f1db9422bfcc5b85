//! Video upload requests.

use std::path::{Path, PathBuf};

use super::error::TransportError;

/// Container formats the backend accepts.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi"];

/// Errors that can occur while preparing or sending an upload.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported file type: {path} (expected .mp4, .mkv or .avi)")]
    UnsupportedFileType { path: PathBuf },

    #[error("Failed to read file: {0}")]
    Read(#[from] std::io::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// A validated video file ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub path: PathBuf,
    pub title: String,
    pub size_bytes: u64,
}

impl UploadRequest {
    /// Validate `path` and pick a title (the file stem unless given).
    pub fn new(path: impl AsRef<Path>, title: Option<String>) -> Result<Self, UploadError> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(UploadError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        if content_type(path).is_none() {
            return Err(UploadError::UnsupportedFileType {
                path: path.to_path_buf(),
            });
        }

        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| {
                path.file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "untitled".to_string())
            });

        let size_bytes = std::fs::metadata(path)?.len();

        Ok(Self {
            path: path.to_path_buf(),
            title,
            size_bytes,
        })
    }

    /// File name sent in the multipart body.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "video".to_string())
    }

    pub fn content_type(&self) -> &'static str {
        content_type(&self.path).unwrap_or("application/octet-stream")
    }
}

/// MIME type for a supported video file, `None` for anything else.
fn content_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "mp4" => Some("video/mp4"),
        "mkv" => Some("video/x-matroska"),
        "avi" => Some("video/x-msvideo"),
        _ => None,
    }
}
