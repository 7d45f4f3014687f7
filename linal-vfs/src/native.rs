//! Native file system implementation

use crate::error::{VfsError, VfsResult};
use crate::SourceFs;
use std::path::Path;

/// Host file system, a thin wrapper over `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFs;

impl NativeFs {
    pub fn new() -> Self {
        Self
    }
}

impl SourceFs for NativeFs {
    fn read_file(&self, path: &Path) -> VfsResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| VfsError::from_io(path, e))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> VfsResult<()> {
        std::fs::write(path, content).map_err(|e| VfsError::from_io(path, e))
    }

    fn remove_file(&self, path: &Path) -> VfsResult<()> {
        std::fs::remove_file(path).map_err(|e| VfsError::from_io(path, e))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
