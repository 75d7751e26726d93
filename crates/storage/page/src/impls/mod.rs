//! Fixed-size slotted page structure and its operations.
//!
//! # Memory Layout
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────┐
//!   │ Page Header (page number, type, next-page link, free ptrs)    │
//!   ├───────────────────────────────────────────────────────────────┤
//!   │ Record Data Region (grows forward)                            │
//!   ├───────────────────────────────────────────────────────────────┤
//!   │ Free Space                                                    │
//!   ├───────────────────────────────────────────────────────────────┤
//!   │ Slot Directory (grows backward, fixed-size SLOT_SIZE entries) │
//!   └───────────────────────────────────────────────────────────────┘
//!
//!                     ↑ page_start                        page_end ↑
//! ```
//!
//! Records are addressed by slot index. Deleting a record zeroes its slot
//! entry but never frees the index for reuse, so a slot index identifies the
//! same record for the lifetime of the page. Scans walk the directory in
//! index order, skipping the zeroed tombstones.
//!
//! Header access is provided via `header::HeaderRef` and `header::HeaderMut`.
//! Slot directory access is provided via the `slot_array` views.

use crate::PAGE_SIZE;
use crate::errors::page_error::{PageResult, WithPageId};
use crate::errors::page_op_error::PageOpError;
use crate::page_id::{PageId, PageNo, SlotNo};

mod accessors;
mod ctors;
mod delete;
mod header_accessors;
mod insert;
mod iter;
mod link;
mod private;
mod read_row;

/// Wrapper around a fixed-size byte array representing a page.
#[derive(Debug)]
pub struct Page {
    /// Unique identifier of the page within the engine.
    page_id: PageId,
    /// Main binary array holding the `PAGE_SIZE` bytes of data for the page.
    /// Boxed and owned by this struct.
    data: Box<[u8; PAGE_SIZE]>,
}

/// Public APIs for the Page struct.
/// All public APIs use the `PageResult` type; errors carry the `page_id` of
/// the page they occurred on.
impl Page {
    /// Retrieves a record from the page by its slot index.
    ///
    /// Returns a borrowed byte slice of the record payload. Fails when the
    /// slot index is out of range or the slot holds no record (deleted).
    pub fn row(&self, slot_no: SlotNo) -> PageResult<&[u8]> {
        self.read_row_internal(slot_no)
            .map_err(PageOpError::from)
            .with_page_id(self.page_id)
    }

    /// Inserts a record into the page, appending a new slot directory entry.
    ///
    /// Returns the slot index the record was placed at. Fails when the record
    /// plus its directory entry do not fit in the remaining free space; that
    /// condition is detectable through [`PageError::is_page_full`].
    ///
    /// [`PageError::is_page_full`]: crate::errors::page_error::PageError::is_page_full
    pub fn insert_row(&mut self, row: &[u8]) -> PageResult<SlotNo> {
        self.insert_row_internal(row)
            .map_err(PageOpError::from)
            .with_page_id(self.page_id)
    }

    /// Deletes the record at the given slot index.
    ///
    /// The slot entry is zeroed into a tombstone; the index is never handed
    /// out again and the record bytes are not reclaimed.
    pub fn delete_row(&mut self, slot_no: SlotNo) -> PageResult<()> {
        self.delete_row_internal(slot_no)
            .map_err(PageOpError::from)
            .with_page_id(self.page_id)
    }

    /// Returns the lowest slot index holding a live record, or `None` when
    /// the page has no records.
    pub fn first_slot(&self) -> PageResult<Option<SlotNo>> {
        self.first_slot_internal()
            .map_err(PageOpError::from)
            .with_page_id(self.page_id)
    }

    /// Returns the lowest slot index strictly greater than `after` holding a
    /// live record, or `None` when the rest of the page is exhausted.
    ///
    /// `after` does not need to reference a live record itself, so iteration
    /// continues correctly after the record under a cursor was deleted.
    pub fn next_slot(&self, after: SlotNo) -> PageResult<Option<SlotNo>> {
        self.next_slot_internal(after)
            .map_err(PageOpError::from)
            .with_page_id(self.page_id)
    }

    /// Returns the number of the page following this one in its chain, or
    /// `None` for the tail page.
    pub fn next_page(&self) -> PageResult<Option<PageNo>> {
        self.next_page_internal()
            .map_err(PageOpError::from)
            .with_page_id(self.page_id)
    }

    /// Sets or clears the chain link to the following page.
    pub fn set_next_page(&mut self, next: Option<PageNo>) -> PageResult<()> {
        self.set_next_page_internal(next)
            .map_err(PageOpError::from)
            .with_page_id(self.page_id)
    }

    /// Returns the number of slot directory entries, live and tombstoned.
    pub fn slot_count(&self) -> PageResult<SlotNo> {
        self.slot_count_internal()
            .map_err(PageOpError::Header)
            .with_page_id(self.page_id)
    }

    fn slot_count_internal(&self) -> Result<SlotNo, crate::errors::header_error::HeaderError> {
        self.header_ref()?.get_slot_count()
    }

    /// Returns an immutable reference to the underlying data of the page.
    pub fn data(&self) -> &[u8; PAGE_SIZE] {
        &self.data
    }

    /// Returns a mutable reference to the underlying byte array of the page.
    pub fn data_mut(&mut self) -> &mut [u8; PAGE_SIZE] {
        &mut self.data
    }
}
