//! VFS error types

use thiserror::Error;

/// Result type for VFS operations
pub type VfsResult<T> = Result<T, VfsError>;

/// Error type for VFS operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VfsError {
    #[error("could not read file '{path}': no such file")]
    NotFound { path: String },

    #[error("could not read file '{path}': permission denied")]
    PermissionDenied { path: String },

    #[error("file '{path}' is not valid UTF-8 (byte {offset})")]
    InvalidUtf8 { path: String, offset: usize },

    #[error("IO error on '{path}': {message}")]
    Io { path: String, message: String },

    #[error("in-memory file system lock poisoned")]
    Poisoned,
}

impl VfsError {
    /// Classify an `std::io::Error` for the given path
    pub fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        let path = path.to_string_lossy().to_string();
        match err.kind() {
            std::io::ErrorKind::NotFound => VfsError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => VfsError::PermissionDenied { path },
            _ => VfsError::Io {
                path,
                message: err.to_string(),
            },
        }
    }

    /// Path the error refers to, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            VfsError::NotFound { path }
            | VfsError::PermissionDenied { path }
            | VfsError::InvalidUtf8 { path, .. }
            | VfsError::Io { path, .. } => Some(path),
            VfsError::Poisoned => None,
        }
    }
}
