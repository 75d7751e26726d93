use crate::api::FileManager;
use crate::errors::FileError;
use crate::file_catalog::FileCatalog;
use page::PAGE_SIZE;
use page::page_id::{FileId, PageId, PageNo};
use std::collections::HashMap;
use std::fs;
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

#[cfg(unix)]
use std::os::unix::fs::FileExt;
#[cfg(windows)]
use std::os::windows::fs::FileExt;

/// An open file handle together with the number of sessions holding it open.
#[derive(Debug)]
struct OpenFile {
    handle: Arc<File>,
    open_count: usize,
}

/// A disk based file manager.
///
/// Open handles are cached and reference counted, so several heap-file
/// instances over the same file share one descriptor and the file stays open
/// until the last of them closes it.
#[derive(Debug)]
pub struct DiskFileManager {
    files: RwLock<HashMap<FileId, OpenFile>>,
    file_catalog: Arc<FileCatalog>,
}

impl FileManager for DiskFileManager {
    fn new(file_catalog: Arc<FileCatalog>) -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            file_catalog,
        }
    }

    fn create_file(&self, file_id: FileId) -> Result<(), FileError> {
        let path = self.path_of(file_id)?;
        Self::ensure_parent_dir(&path)?;

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(FileError::AlreadyExists { path })
            }
            Err(source) => Err(FileError::Io { path, source }),
        }
    }

    fn open_file(&self, file_id: FileId) -> Result<(), FileError> {
        let mut files = self.files.write().unwrap();

        if let Some(open) = files.get_mut(&file_id) {
            open.open_count += 1;
            return Ok(());
        }

        let path = self.path_of(file_id)?;
        let handle = match OpenOptions::new().read(true).write(true).open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(FileError::NotFound { path });
            }
            Err(source) => return Err(FileError::Io { path, source }),
        };

        files.insert(
            file_id,
            OpenFile {
                handle: Arc::new(handle),
                open_count: 1,
            },
        );
        Ok(())
    }

    fn close_file(&self, file_id: FileId) -> Result<(), FileError> {
        let mut files = self.files.write().unwrap();

        let Some(open) = files.get_mut(&file_id) else {
            return Err(FileError::NotOpen { file_id });
        };

        open.open_count -= 1;
        if open.open_count == 0 {
            files.remove(&file_id);
        }
        Ok(())
    }

    fn destroy_file(&self, file_id: FileId) -> Result<(), FileError> {
        {
            let files = self.files.read().unwrap();
            if files.contains_key(&file_id) {
                return Err(FileError::StillOpen { file_id });
            }
        }

        let path = self.path_of(file_id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(FileError::NotFound { path }),
            Err(source) => Err(FileError::Io { path, source }),
        }
    }

    fn first_page(&self, file_id: FileId) -> Result<PageNo, FileError> {
        let handle = self.handle(file_id)?;
        let len = handle
            .metadata()
            .map_err(|source| self.io_error(file_id, source))?
            .len();

        if (len as usize) < PAGE_SIZE {
            return Err(FileError::NoPages { file_id });
        }
        Ok(0)
    }

    fn allocate_page(&self, file_id: FileId) -> Result<PageNo, FileError> {
        let handle = self.handle(file_id)?;
        let len = handle
            .metadata()
            .map_err(|source| self.io_error(file_id, source))?
            .len();

        let page_no = (len as usize / PAGE_SIZE) as PageNo;
        let offset = page_no as u64 * PAGE_SIZE as u64;

        let zeroed = [0u8; PAGE_SIZE];
        Self::write_all_at(&handle, &zeroed, offset)
            .map_err(|source| self.io_error(file_id, source))?;

        Ok(page_no)
    }

    fn read_page(&self, page_id: PageId, destination: &mut [u8]) -> Result<(), FileError> {
        let handle = self.handle(page_id.file_id)?;
        let offset = page_id.page_number as u64 * PAGE_SIZE as u64;

        match Self::read_exact_at(&handle, destination, offset) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                Err(FileError::PageOutOfBounds { page_id })
            }
            Err(source) => Err(self.io_error(page_id.file_id, source)),
        }
    }

    fn write_page(&self, page_id: PageId, page_data: &[u8]) -> Result<(), FileError> {
        let handle = self.handle(page_id.file_id)?;
        let offset = page_id.page_number as u64 * PAGE_SIZE as u64;

        Self::write_all_at(&handle, page_data, offset)
            .map_err(|source| self.io_error(page_id.file_id, source))
    }
}

impl DiskFileManager {
    fn path_of(&self, file_id: FileId) -> Result<PathBuf, FileError> {
        self.file_catalog
            .path_of(file_id)
            .ok_or(FileError::NotRegistered { file_id })
    }

    fn handle(&self, file_id: FileId) -> Result<Arc<File>, FileError> {
        let files = self.files.read().unwrap();
        files
            .get(&file_id)
            .map(|open| Arc::clone(&open.handle))
            .ok_or(FileError::NotOpen { file_id })
    }

    fn io_error(&self, file_id: FileId, source: std::io::Error) -> FileError {
        FileError::Io {
            path: self.file_catalog.path_of(file_id).unwrap_or_default(),
            source,
        }
    }

    fn ensure_parent_dir(path: &Path) -> Result<(), FileError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| FileError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    #[inline]
    fn read_exact_at(file: &File, buf: &mut [u8], offset: u64) -> std::io::Result<()> {
        #[cfg(unix)]
        {
            file.read_exact_at(buf, offset)
        }

        #[cfg(windows)]
        {
            let mut read = 0;
            while read < buf.len() {
                let n = file.seek_read(&mut buf[read..], offset + read as u64)?;
                if n == 0 {
                    return Err(std::io::ErrorKind::UnexpectedEof.into());
                }
                read += n;
            }
            Ok(())
        }
    }

    #[inline]
    fn write_all_at(file: &File, buf: &[u8], offset: u64) -> std::io::Result<()> {
        #[cfg(unix)]
        {
            file.write_all_at(buf, offset)
        }

        #[cfg(windows)]
        {
            let mut written = 0;
            while written < buf.len() {
                let n = file.seek_write(&buf[written..], offset + written as u64)?;
                if n == 0 {
                    return Err(std::io::ErrorKind::WriteZero.into());
                }
                written += n;
            }
            Ok(())
        }
    }
}
