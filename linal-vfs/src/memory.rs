//! In-memory file system implementation

use crate::error::{VfsError, VfsResult};
use crate::SourceFs;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

/// In-memory files keyed by normalized path.
///
/// Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a file system pre-populated with `(path, content)` pairs
    pub fn with_files<I, S, C>(files: I) -> Self
    where
        I: IntoIterator<Item = (S, C)>,
        S: AsRef<str>,
        C: Into<Vec<u8>>,
    {
        let map = files
            .into_iter()
            .map(|(path, content)| (normalize(Path::new(path.as_ref())), content.into()))
            .collect();
        Self {
            files: Arc::new(RwLock::new(map)),
        }
    }

    /// Number of stored files
    pub fn len(&self) -> usize {
        self.files.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Forward slashes, no leading `./`
fn normalize(path: &Path) -> String {
    let text = path.to_string_lossy().replace('\\', "/");
    match text.strip_prefix("./") {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

impl SourceFs for MemoryFs {
    fn read_file(&self, path: &Path) -> VfsResult<Vec<u8>> {
        let files = self.files.read().map_err(|_| VfsError::Poisoned)?;
        files
            .get(&normalize(path))
            .cloned()
            .ok_or_else(|| VfsError::NotFound {
                path: path.to_string_lossy().to_string(),
            })
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> VfsResult<()> {
        let mut files = self.files.write().map_err(|_| VfsError::Poisoned)?;
        files.insert(normalize(path), content.to_vec());
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> VfsResult<()> {
        let mut files = self.files.write().map_err(|_| VfsError::Poisoned)?;
        files
            .remove(&normalize(path))
            .map(|_| ())
            .ok_or_else(|| VfsError::NotFound {
                path: path.to_string_lossy().to_string(),
            })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files
            .read()
            .map(|m| m.contains_key(&normalize(path)))
            .unwrap_or(false)
    }
}
