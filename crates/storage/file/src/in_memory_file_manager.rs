use crate::api::FileManager;
use crate::errors::FileError;
use crate::file_catalog::FileCatalog;
use page::PAGE_SIZE;
use page::page_id::{FileId, PageId, PageNo};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// One simulated file: its pages and the number of sessions holding it open.
#[derive(Debug, Default)]
struct MemFile {
    pages: Vec<Box<[u8; PAGE_SIZE]>>,
    open_count: usize,
}

/// A memory-backed file manager with the same open/close and page semantics
/// as the disk one. Files survive close and reopen within the same instance,
/// which is what the buffer and heap test suites rely on.
#[derive(Debug)]
pub struct InMemoryFileManager {
    files: RwLock<HashMap<FileId, MemFile>>,
    file_catalog: Arc<FileCatalog>,
}

impl FileManager for InMemoryFileManager {
    fn new(file_catalog: Arc<FileCatalog>) -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            file_catalog,
        }
    }

    fn create_file(&self, file_id: FileId) -> Result<(), FileError> {
        let mut files = self.files.write().unwrap();

        if files.contains_key(&file_id) {
            return Err(FileError::AlreadyExists {
                path: self.path_of(file_id),
            });
        }

        files.insert(file_id, MemFile::default());
        Ok(())
    }

    fn open_file(&self, file_id: FileId) -> Result<(), FileError> {
        let mut files = self.files.write().unwrap();

        let Some(file) = files.get_mut(&file_id) else {
            return Err(FileError::NotFound {
                path: self.path_of(file_id),
            });
        };

        file.open_count += 1;
        Ok(())
    }

    fn close_file(&self, file_id: FileId) -> Result<(), FileError> {
        let mut files = self.files.write().unwrap();

        match files.get_mut(&file_id) {
            Some(file) if file.open_count > 0 => {
                file.open_count -= 1;
                Ok(())
            }
            _ => Err(FileError::NotOpen { file_id }),
        }
    }

    fn destroy_file(&self, file_id: FileId) -> Result<(), FileError> {
        let mut files = self.files.write().unwrap();

        match files.get(&file_id) {
            None => {
                return Err(FileError::NotFound {
                    path: self.path_of(file_id),
                });
            }
            Some(file) if file.open_count > 0 => {
                return Err(FileError::StillOpen { file_id });
            }
            Some(_) => {}
        }

        files.remove(&file_id);
        Ok(())
    }

    fn first_page(&self, file_id: FileId) -> Result<PageNo, FileError> {
        let files = self.files.read().unwrap();
        let file = Self::open_file_entry(&files, file_id)?;

        if file.pages.is_empty() {
            return Err(FileError::NoPages { file_id });
        }
        Ok(0)
    }

    fn allocate_page(&self, file_id: FileId) -> Result<PageNo, FileError> {
        let mut files = self.files.write().unwrap();
        let file = Self::open_file_entry_mut(&mut files, file_id)?;

        file.pages.push(Box::new([0u8; PAGE_SIZE]));
        Ok((file.pages.len() - 1) as PageNo)
    }

    fn read_page(&self, page_id: PageId, destination: &mut [u8]) -> Result<(), FileError> {
        let files = self.files.read().unwrap();
        let file = Self::open_file_entry(&files, page_id.file_id)?;

        let Some(page) = file.pages.get(page_id.page_number as usize) else {
            return Err(FileError::PageOutOfBounds { page_id });
        };

        destination.copy_from_slice(&page[..]);
        Ok(())
    }

    fn write_page(&self, page_id: PageId, page_data: &[u8]) -> Result<(), FileError> {
        let mut files = self.files.write().unwrap();
        let file = Self::open_file_entry_mut(&mut files, page_id.file_id)?;

        let Some(page) = file.pages.get_mut(page_id.page_number as usize) else {
            return Err(FileError::PageOutOfBounds { page_id });
        };

        page.copy_from_slice(page_data);
        Ok(())
    }
}

impl InMemoryFileManager {
    fn path_of(&self, file_id: FileId) -> PathBuf {
        self.file_catalog.path_of(file_id).unwrap_or_default()
    }

    fn open_file_entry<'a>(
        files: &'a HashMap<FileId, MemFile>,
        file_id: FileId,
    ) -> Result<&'a MemFile, FileError> {
        match files.get(&file_id) {
            Some(file) if file.open_count > 0 => Ok(file),
            _ => Err(FileError::NotOpen { file_id }),
        }
    }

    fn open_file_entry_mut<'a>(
        files: &'a mut HashMap<FileId, MemFile>,
        file_id: FileId,
    ) -> Result<&'a mut MemFile, FileError> {
        match files.get_mut(&file_id) {
            Some(file) if file.open_count > 0 => Ok(file),
            _ => Err(FileError::NotOpen { file_id }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_manager() -> (InMemoryFileManager, FileId) {
        let catalog = Arc::new(FileCatalog::new());
        let file_id = catalog.file_id_for("t1.tbl");
        (InMemoryFileManager::new(catalog), file_id)
    }

    #[test]
    fn lifecycle_mirrors_the_disk_manager() {
        let (manager, file_id) = memory_manager();

        manager.create_file(file_id).unwrap();
        assert!(matches!(
            manager.create_file(file_id),
            Err(FileError::AlreadyExists { .. })
        ));

        manager.open_file(file_id).unwrap();
        assert!(matches!(
            manager.destroy_file(file_id),
            Err(FileError::StillOpen { .. })
        ));

        manager.close_file(file_id).unwrap();
        manager.destroy_file(file_id).unwrap();
        assert!(matches!(
            manager.open_file(file_id),
            Err(FileError::NotFound { .. })
        ));
    }

    #[test]
    fn page_content_survives_close_and_reopen() {
        let (manager, file_id) = memory_manager();

        manager.create_file(file_id).unwrap();
        manager.open_file(file_id).unwrap();
        let page_no = manager.allocate_page(file_id).unwrap();
        let page_id = PageId::new(file_id, page_no);

        manager.write_page(page_id, &[9u8; PAGE_SIZE]).unwrap();
        manager.close_file(file_id).unwrap();

        manager.open_file(file_id).unwrap();
        let mut readback = [0u8; PAGE_SIZE];
        manager.read_page(page_id, &mut readback).unwrap();
        assert_eq!(readback, [9u8; PAGE_SIZE]);
        manager.close_file(file_id).unwrap();
    }

    #[test]
    fn page_access_requires_an_open_file() {
        let (manager, file_id) = memory_manager();
        manager.create_file(file_id).unwrap();

        let mut buf = [0u8; PAGE_SIZE];
        assert!(matches!(
            manager.read_page(PageId::new(file_id, 0), &mut buf),
            Err(FileError::NotOpen { .. })
        ));
        assert!(matches!(
            manager.allocate_page(file_id),
            Err(FileError::NotOpen { .. })
        ));
    }
}
