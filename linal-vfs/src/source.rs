//! SourceFs trait definition

use crate::error::{VfsError, VfsResult};
use std::path::Path;

/// Whole-file access used by the generator, the session and the CLI.
///
/// # Implementations
/// - `MemoryFs`: in-memory files, for tests and embedding
/// - `NativeFs`: the host file system
pub trait SourceFs: Send + Sync {
    /// Read the whole file as raw bytes
    fn read_file(&self, path: &Path) -> VfsResult<Vec<u8>>;

    /// Create or truncate the file and write `content`
    fn write_file(&self, path: &Path, content: &[u8]) -> VfsResult<()>;

    /// Remove a file; removing a missing file is an error
    fn remove_file(&self, path: &Path) -> VfsResult<()>;

    fn exists(&self, path: &Path) -> bool;

    /// Read the whole file and require UTF-8
    fn read_to_string(&self, path: &Path) -> VfsResult<String> {
        let bytes = self.read_file(path)?;
        String::from_utf8(bytes).map_err(|e| VfsError::InvalidUtf8 {
            path: path.to_string_lossy().to_string(),
            offset: e.utf8_error().valid_up_to(),
        })
    }
}
