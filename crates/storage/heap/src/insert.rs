//! Append-only insertion into a heap file.

use crate::errors::HeapError;
use crate::heap_file::HeapFile;
use crate::rid::Rid;
use buffer::buffer::BufferManager;
use file::api::FileManager;
use file::file_catalog::FileCatalog;
use page::errors::page_error::PageError;
use page::page_id::{PageNo, SlotNo};
use page::page_type::PageType;
use std::path::Path;
use std::sync::Arc;

/// An append cursor over a heap file.
///
/// Records go to the tail page of the chain; when that page is full, a new
/// page is allocated, linked behind the tail and made current. The tail page
/// stays pinned across calls so consecutive inserts touch the buffer map
/// only once.
#[derive(Debug)]
pub struct InsertFileScan<F: FileManager> {
    heap: HeapFile<F>,
}

impl<F: FileManager> InsertFileScan<F> {
    /// Opens the heap file at `path` and wraps it in an append cursor.
    pub fn open(
        buffer: Arc<BufferManager<F>>,
        files: Arc<F>,
        catalog: &FileCatalog,
        path: impl AsRef<Path>,
    ) -> Result<Self, HeapError> {
        Ok(Self {
            heap: HeapFile::open(buffer, files, catalog, path)?,
        })
    }

    /// Appends `record` to the file and returns its record id.
    ///
    /// A full tail page triggers one chain growth: allocate, link, retry.
    /// The retry failing again means the record does not fit an empty page;
    /// that error surfaces to the caller. The freshly linked page stays in
    /// the chain either way, empty but consistent.
    pub fn insert_record(&mut self, record: &[u8]) -> Result<Rid, HeapError> {
        // Inserts must target the tail of the chain; growing the chain off
        // any other page would orphan everything behind it. The current page
        // is re-anchored whenever it is not the tail (freshly opened files
        // arrive here with the head pinned).
        let cur_no = match (self.heap.cur_page_no, self.heap.last_page()?) {
            (Some(no), Some(last)) if no == last => no,
            (_, Some(last)) => {
                self.heap.unpin_current()?;
                self.heap.pin_as_current(last)?;
                last
            }
            (_, None) => {
                self.heap.unpin_current()?;
                self.start_first_page()?
            }
        };

        match self.try_insert(cur_no, record)? {
            Ok(slot_no) => return self.finish_insert(cur_no, slot_no),
            Err(e) if !e.is_page_full() => return Err(e.into()),
            Err(_) => {}
        }

        // The tail is full: grow the chain by one page.
        let new_no = self.heap.buffer().alloc_page(self.heap.file_id())?;
        let new_id = self.heap.page_id(new_no);
        self.heap
            .buffer()
            .with_page_mut(new_id, |page| page.initialize(new_id, PageType::Heap))??;

        let linked = self
            .heap
            .buffer()
            .with_page_mut(self.heap.page_id(cur_no), |page| {
                page.set_next_page(Some(new_no))
            })?;
        if let Err(e) = linked {
            // Nothing references the new page; release it without writing.
            let _ = self.heap.buffer().unpin_page(new_id, false);
            return Err(e.into());
        }
        self.heap.cur_dirty = true; // the link write

        self.heap.update_header(|header| {
            header.set_last_page(new_no)?;
            let page_cnt = header.get_page_cnt()?;
            header.set_page_cnt(page_cnt + 1)
        })?;

        // Retire the full page; the pin from alloc_page carries over to the
        // new current page.
        if let Err(e) = self.heap.unpin_current() {
            let _ = self.heap.buffer().unpin_page(new_id, true);
            return Err(e);
        }
        self.heap.cur_page_no = Some(new_no);
        self.heap.cur_dirty = true;

        let slot_no = self.try_insert(new_no, record)??;
        self.finish_insert(new_no, slot_no)
    }

    /// Total number of records in the file.
    pub fn rec_count(&self) -> Result<u32, HeapError> {
        self.heap.rec_count()
    }

    /// Attempts the page-level insert; the inner result separates page
    /// errors (full page among them) from buffer failures.
    fn try_insert(
        &self,
        page_no: PageNo,
        record: &[u8],
    ) -> Result<Result<SlotNo, PageError>, HeapError> {
        let attempt = self
            .heap
            .buffer()
            .with_page_mut(self.heap.page_id(page_no), |page| page.insert_row(record))?;
        Ok(attempt)
    }

    /// Books a successful insert: current page and header dirty, record
    /// count bumped.
    fn finish_insert(&mut self, page_no: PageNo, slot_no: SlotNo) -> Result<Rid, HeapError> {
        self.heap.cur_dirty = true;
        self.heap.update_header(|header| {
            let rec_cnt = header.get_rec_cnt()?;
            header.set_rec_cnt(rec_cnt + 1)
        })?;
        Ok(Rid::new(page_no, slot_no))
    }

    /// Allocates and initializes the first data page of an empty file and
    /// hooks it into the header.
    fn start_first_page(&mut self) -> Result<PageNo, HeapError> {
        let new_no = self.heap.buffer().alloc_page(self.heap.file_id())?;
        let new_id = self.heap.page_id(new_no);
        self.heap
            .buffer()
            .with_page_mut(new_id, |page| page.initialize(new_id, PageType::Heap))??;

        self.heap.update_header(|header| {
            header.set_first_page(new_no)?;
            header.set_last_page(new_no)?;
            header.set_page_cnt(1)
        })?;

        self.heap.cur_page_no = Some(new_no);
        self.heap.cur_dirty = true;
        Ok(new_no)
    }
}
