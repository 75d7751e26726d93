//! Heap file lifecycle and point lookup.

use crate::errors::HeapError;
use crate::file_header::{FileHeaderMut, FileHeaderRef, NO_PAGE};
use crate::rid::Rid;
use binary_helpers::bin_error::BinaryError;
use buffer::buffer::BufferManager;
use file::api::FileManager;
use file::errors::FileError;
use file::file_catalog::FileCatalog;
use page::page_id::{FileId, PageId, PageNo};
use page::page_type::PageType;
use std::path::Path;
use std::sync::Arc;

/// Creates a new heap file at `path`.
///
/// The file starts out as a header page followed by one empty data page, so
/// a freshly created file is scannable and insertable right away. Both pages
/// are unpinned dirty and flushed before the file is closed again.
///
/// Fails with [`HeapError::FileExists`] when the file is already on storage.
/// A failure after the file was created leaves the partial file behind;
/// callers may remove it with [`destroy_heap_file`].
pub fn create_heap_file<F: FileManager>(
    buffer: &BufferManager<F>,
    files: &F,
    catalog: &FileCatalog,
    path: impl AsRef<Path>,
) -> Result<(), HeapError> {
    let path = path.as_ref();
    let file_id = catalog.file_id_for(path);

    match files.create_file(file_id) {
        Ok(()) => {}
        Err(FileError::AlreadyExists { path }) => return Err(HeapError::FileExists { path }),
        Err(e) => return Err(e.into()),
    }
    files.open_file(file_id)?;

    // The header page must be the file's first page.
    let header_page_no = buffer.alloc_page(file_id)?;
    let header_id = PageId::new(file_id, header_page_no);

    let first_data_no = buffer.alloc_page(file_id)?;
    let data_id = PageId::new(file_id, first_data_no);

    let name = path.to_string_lossy();
    buffer.with_page_mut(header_id, |page| -> Result<(), HeapError> {
        page.initialize(header_id, PageType::FileHeader)?;
        let mut header = FileHeaderMut::new(page.data_mut());
        header.default(&name)?;
        header.set_first_page(first_data_no)?;
        header.set_last_page(first_data_no)?;
        header.set_page_cnt(1)?;
        Ok(())
    })??;

    buffer.with_page_mut(data_id, |page| page.initialize(data_id, PageType::Heap))??;

    buffer.unpin_page(header_id, true)?;
    buffer.unpin_page(data_id, true)?;
    buffer.flush_file(file_id)?;
    files.close_file(file_id)?;

    tracing::info!(file = %path.display(), "created heap file");
    Ok(())
}

/// Removes the heap file at `path` from storage.
///
/// Pure delegation to the file manager; by contract no open heap-file
/// instances exist over the file anymore.
pub fn destroy_heap_file<F: FileManager>(
    files: &F,
    catalog: &FileCatalog,
    path: impl AsRef<Path>,
) -> Result<(), HeapError> {
    let file_id = catalog.file_id_for(path.as_ref());
    files.destroy_file(file_id)?;
    Ok(())
}

/// An open heap file.
///
/// Holds the header page pinned for its whole lifetime and caches at most
/// one data page as the *current* page. Whenever an operation needs a
/// different data page, the old current page is unpinned first, carrying the
/// dirtiness it accumulated. Dropping the instance releases both pins,
/// flushes the file and closes it.
///
/// Instances are session-scoped: a `HeapFile` is not meant to be shared
/// between threads. Several instances may be open over the same file; the
/// buffer manager serializes their frame access.
#[derive(Debug)]
pub struct HeapFile<F: FileManager> {
    buffer: Arc<BufferManager<F>>,
    files: Arc<F>,
    file_id: FileId,
    header_page_no: PageNo,
    pub(crate) hdr_dirty: bool,
    pub(crate) cur_page_no: Option<PageNo>,
    pub(crate) cur_dirty: bool,
    pub(crate) cur_rec: Option<Rid>,
}

impl<F: FileManager> HeapFile<F> {
    /// Opens the heap file at `path`.
    ///
    /// Pins the header page and, for a non-empty file, the first data page
    /// as the current page. Every pin acquired before a failure is released
    /// again on the error path.
    pub fn open(
        buffer: Arc<BufferManager<F>>,
        files: Arc<F>,
        catalog: &FileCatalog,
        path: impl AsRef<Path>,
    ) -> Result<Self, HeapError> {
        let path = path.as_ref();
        let file_id = catalog.file_id_for(path);
        files.open_file(file_id)?;

        let header_page_no = match files.first_page(file_id) {
            Ok(no) => no,
            Err(e) => {
                let _ = files.close_file(file_id);
                return Err(e.into());
            }
        };

        let header_id = PageId::new(file_id, header_page_no);
        if let Err(e) = buffer.pin_page(header_id) {
            let _ = files.close_file(file_id);
            return Err(e.into());
        }

        let read = buffer.with_page(header_id, |page| {
            FileHeaderRef::new(page.data()).get_first_page()
        });
        let raw_first = match read {
            Ok(Ok(raw)) => raw,
            Ok(Err(codec)) => {
                let _ = buffer.unpin_page(header_id, false);
                let _ = files.close_file(file_id);
                return Err(codec.into());
            }
            Err(buf) => {
                let _ = buffer.unpin_page(header_id, false);
                let _ = files.close_file(file_id);
                return Err(buf.into());
            }
        };

        let cur_page_no = if raw_first != NO_PAGE {
            if let Err(e) = buffer.pin_page(PageId::new(file_id, raw_first)) {
                let _ = buffer.unpin_page(header_id, false);
                let _ = files.close_file(file_id);
                return Err(e.into());
            }
            Some(raw_first)
        } else {
            None
        };

        tracing::info!(file = %path.display(), "opened heap file");

        Ok(Self {
            buffer,
            files,
            file_id,
            header_page_no,
            hdr_dirty: false,
            cur_page_no,
            cur_dirty: false,
            cur_rec: None,
        })
    }

    /// Total number of records in the file.
    pub fn rec_count(&self) -> Result<u32, HeapError> {
        self.read_header(|header| header.get_rec_cnt())
    }

    /// Number of data pages in the chain, not counting the header page.
    pub fn page_count(&self) -> Result<u32, HeapError> {
        self.read_header(|header| header.get_page_cnt())
    }

    /// The file name recorded in the header at creation.
    pub fn file_name(&self) -> Result<String, HeapError> {
        let name = self
            .buffer
            .with_page(self.header_id(), |page| {
                FileHeaderRef::new(page.data()).file_name()
            })?;
        Ok(name)
    }

    /// Head of the data-page chain, `None` while the file is empty.
    pub fn first_page(&self) -> Result<Option<PageNo>, HeapError> {
        let raw = self.read_header(|header| header.get_first_page())?;
        Ok((raw != NO_PAGE).then_some(raw))
    }

    /// Tail of the data-page chain, `None` while the file is empty.
    pub fn last_page(&self) -> Result<Option<PageNo>, HeapError> {
        let raw = self.read_header(|header| header.get_last_page())?;
        Ok((raw != NO_PAGE).then_some(raw))
    }

    /// Retrieves a copy of the record payload stored under `rid`.
    ///
    /// When the record lives on a different page than the current one, the
    /// current page is unpinned and the record's page becomes current. A
    /// failed slot lookup leaves that page pinned as current, so a retry
    /// does not pin again.
    pub fn get_record(&mut self, rid: Rid) -> Result<Vec<u8>, HeapError> {
        if rid.page_no == self.header_page_no {
            return Err(HeapError::BadPageNo { rid });
        }

        if self.cur_page_no != Some(rid.page_no) {
            self.unpin_current()?;
            self.pin_as_current(rid.page_no)?;
        }

        let record = self
            .buffer
            .with_page(self.page_id(rid.page_no), |page| {
                page.row(rid.slot_no).map(<[u8]>::to_vec)
            })??;

        self.cur_rec = Some(rid);
        Ok(record)
    }

    /// The id of this file within the engine.
    pub(crate) fn file_id(&self) -> FileId {
        self.file_id
    }

    pub(crate) fn buffer(&self) -> &BufferManager<F> {
        &self.buffer
    }

    pub(crate) fn page_id(&self, page_no: PageNo) -> PageId {
        PageId::new(self.file_id, page_no)
    }

    fn header_id(&self) -> PageId {
        self.page_id(self.header_page_no)
    }

    /// Unpins the current data page, if any, with its accumulated dirty
    /// flag. Afterwards there is no current page, also when the unpin itself
    /// failed.
    pub(crate) fn unpin_current(&mut self) -> Result<(), HeapError> {
        let Some(cur) = self.cur_page_no.take() else {
            return Ok(());
        };
        let dirty = std::mem::replace(&mut self.cur_dirty, false);
        self.buffer.unpin_page(self.page_id(cur), dirty)?;
        Ok(())
    }

    /// Pins `page_no` and makes it the current page. The previous current
    /// page must already be released; on failure there is no current page.
    pub(crate) fn pin_as_current(&mut self, page_no: PageNo) -> Result<(), HeapError> {
        debug_assert!(self.cur_page_no.is_none());
        self.buffer.pin_page(self.page_id(page_no))?;
        self.cur_page_no = Some(page_no);
        self.cur_dirty = false;
        Ok(())
    }

    /// Reads a value out of the pinned header page.
    pub(crate) fn read_header<T>(
        &self,
        f: impl FnOnce(FileHeaderRef<'_>) -> Result<T, BinaryError>,
    ) -> Result<T, HeapError> {
        let read = self
            .buffer
            .with_page(self.header_id(), |page| f(FileHeaderRef::new(page.data())))?;
        Ok(read?)
    }

    /// Mutates the pinned header page and marks the header dirty. The dirty
    /// flag is only raised when the mutation succeeded.
    pub(crate) fn update_header<T>(
        &mut self,
        f: impl FnOnce(&mut FileHeaderMut<'_>) -> Result<T, BinaryError>,
    ) -> Result<T, HeapError> {
        let written = self.buffer.with_page_mut(self.header_id(), |page| {
            f(&mut FileHeaderMut::new(page.data_mut()))
        })?;
        let value = written?;
        self.hdr_dirty = true;
        Ok(value)
    }
}

impl<F: FileManager> Drop for HeapFile<F> {
    /// Releases the data-page pin and the header pin, flushes the file and
    /// closes it. Failures on this path are reported on the diagnostic
    /// channel; dropping never panics over them.
    fn drop(&mut self) {
        if let Some(cur) = self.cur_page_no.take() {
            let page_id = self.page_id(cur);
            if let Err(e) = self.buffer.unpin_page(page_id, self.cur_dirty) {
                tracing::error!(page = %page_id, error = %e, "failed to unpin data page while closing heap file");
            }
        }

        if let Err(e) = self.buffer.unpin_page(self.header_id(), self.hdr_dirty) {
            tracing::error!(page = %self.header_id(), error = %e, "failed to unpin header page while closing heap file");
        }

        if let Err(e) = self.buffer.flush_file(self.file_id) {
            tracing::error!(file_id = self.file_id, error = %e, "failed to flush heap file");
        }

        if let Err(e) = self.files.close_file(self.file_id) {
            tracing::error!(file_id = self.file_id, error = %e, "failed to close heap file");
        }
    }
}
