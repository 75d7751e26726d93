//! Public API for the `file` crate

use crate::errors::FileError;
use crate::file_catalog::FileCatalog;
use page::page_id::{FileId, PageId, PageNo};
use std::sync::Arc;

/// File manager public API
///
/// A `FileManager` manages a collection of files, each a sequence of
/// fixed-size pages addressed by `PageId`. Files are identified by `FileId`;
/// the mapping from ids to storage locations lives in the shared
/// [`FileCatalog`]. Implementations are free to choose the backing storage.
///
/// Pages may only be read, written or allocated while their file is open.
/// Open calls nest: a file opened by several sessions stays open until each
/// has issued its matching close.
pub trait FileManager {
    /// Creates a new file manager instance using the provided catalog to
    /// resolve file ids.
    fn new(file_catalog: Arc<FileCatalog>) -> Self
    where
        Self: Sized;

    /// Creates the backing storage for `file_id`, initially empty.
    ///
    /// Fails with [`FileError::AlreadyExists`] when the file already exists.
    fn create_file(&self, file_id: FileId) -> Result<(), FileError>;

    /// Opens an existing file, or increments its open count when it is
    /// already open.
    ///
    /// Fails with [`FileError::NotFound`] when the file does not exist.
    fn open_file(&self, file_id: FileId) -> Result<(), FileError>;

    /// Decrements the file's open count, releasing the underlying handle when
    /// the count reaches zero.
    fn close_file(&self, file_id: FileId) -> Result<(), FileError>;

    /// Removes the backing storage for `file_id`.
    ///
    /// Fails with [`FileError::StillOpen`] while any session holds the file
    /// open.
    fn destroy_file(&self, file_id: FileId) -> Result<(), FileError>;

    /// Returns the number of the file's first page.
    ///
    /// Fails with [`FileError::NoPages`] when the file holds no pages yet.
    fn first_page(&self, file_id: FileId) -> Result<PageNo, FileError>;

    /// Extends the file by one zeroed page and returns its page number.
    fn allocate_page(&self, file_id: FileId) -> Result<PageNo, FileError>;

    /// Reads the page identified by `page_id` into `destination`. The buffer
    /// length must equal the storage page size.
    fn read_page(&self, page_id: PageId, destination: &mut [u8]) -> Result<(), FileError>;

    /// Writes the contents of `page_data` as the page for `page_id`. The
    /// slice length must equal the storage page size.
    fn write_page(&self, page_id: PageId, page_data: &[u8]) -> Result<(), FileError>;
}
