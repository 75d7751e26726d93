//! A file catalog mapping file IDs to their file names

use page::page_id::FileId;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Catalog holding the mappings between a `FileId` and the path of its
/// backing storage. Ids are assigned on first registration and stable for
/// the lifetime of the catalog, so every component of the engine resolves a
/// given path to the same id.
#[derive(Debug)]
pub struct FileCatalog {
    inner: RwLock<CatalogInner>,
}

#[derive(Debug)]
struct CatalogInner {
    by_id: HashMap<FileId, PathBuf>,
    by_path: HashMap<PathBuf, FileId>,
    next_id: FileId,
}

impl Default for FileCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl FileCatalog {
    /// Creates a new empty `FileCatalog`.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(CatalogInner {
                by_id: HashMap::new(),
                by_path: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Returns the id registered for `path`, assigning a fresh one on first
    /// sight of the path.
    pub fn file_id_for(&self, path: impl Into<PathBuf>) -> FileId {
        let path = path.into();

        {
            let guard = self
                .inner
                .read()
                .expect("FileCatalog poisoned: another thread panicked while holding the lock");
            if let Some(id) = guard.by_path.get(&path) {
                return *id;
            }
        }

        let mut guard = self
            .inner
            .write()
            .expect("FileCatalog poisoned: another thread panicked while holding the lock");

        // Double-check: another thread may have registered the path between
        // the read and write lock.
        if let Some(id) = guard.by_path.get(&path) {
            return *id;
        }

        let id = guard.next_id;
        guard.next_id += 1;
        guard.by_id.insert(id, path.clone());
        guard.by_path.insert(path, id);
        id
    }

    /// Resolves a previously registered path to its id.
    pub fn lookup(&self, path: &Path) -> Option<FileId> {
        let guard = self
            .inner
            .read()
            .expect("FileCatalog poisoned: another thread panicked while holding the lock");
        guard.by_path.get(path).copied()
    }

    /// Resolves a `file_id` to the path it was registered with.
    pub fn path_of(&self, file_id: FileId) -> Option<PathBuf> {
        let guard = self
            .inner
            .read()
            .expect("FileCatalog poisoned: another thread panicked while holding the lock");
        guard.by_id.get(&file_id).cloned()
    }
}
