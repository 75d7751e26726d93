//! Filtered sequential scans over a heap file.

use crate::errors::{HeapError, PredicateError};
use crate::heap_file::HeapFile;
use crate::rid::Rid;
use buffer::buffer::BufferManager;
use file::api::FileManager;
use file::file_catalog::FileCatalog;
use page::errors::page_error::PageError;
use page::page_id::{PageNo, SlotNo};
use std::cmp::Ordering;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Comparison operators available to scan filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompOp {
    Lt,
    Lte,
    Eq,
    Gte,
    Gt,
    Ne,
}

impl fmt::Display for CompOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CompOp::Lt => "<",
            CompOp::Lte => "<=",
            CompOp::Eq => "=",
            CompOp::Gte => ">=",
            CompOp::Gt => ">",
            CompOp::Ne => "!=",
        };
        f.write_str(s)
    }
}

impl CompOp {
    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            CompOp::Lt => ordering == Ordering::Less,
            CompOp::Lte => ordering != Ordering::Greater,
            CompOp::Eq => ordering == Ordering::Equal,
            CompOp::Gte => ordering != Ordering::Less,
            CompOp::Gt => ordering == Ordering::Greater,
            CompOp::Ne => ordering != Ordering::Equal,
        }
    }
}

/// Attribute types a scan filter can compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrType {
    /// A native 32-bit signed integer.
    Int,
    /// A native 32-bit float.
    Float,
    /// Raw bytes, compared lexicographically over the full window.
    Bytes,
}

/// A filter evaluated over a fixed byte window of each record.
///
/// The window is `length` bytes starting at `offset` within the record
/// payload; records too short to contain the window never match. For `Int`
/// and `Float` the window and the filter value are read in the platform's
/// native byte order, matching how callers encode them.
#[derive(Debug, Clone)]
pub struct Predicate {
    /// Byte offset of the compared attribute within the record.
    pub offset: usize,
    /// Width of the compared window in bytes.
    pub length: usize,
    /// How the window bytes are interpreted.
    pub attr_type: AttrType,
    /// Comparison between the record attribute and the filter value.
    pub op: CompOp,
    /// The filter value, pre-encoded to exactly `length` bytes.
    pub value: Vec<u8>,
}

impl Predicate {
    pub(crate) fn validate(&self) -> Result<(), PredicateError> {
        if self.length < 1 {
            return Err(PredicateError::ZeroLength);
        }

        let fixed_width = match self.attr_type {
            AttrType::Int => Some(size_of::<i32>()),
            AttrType::Float => Some(size_of::<f32>()),
            AttrType::Bytes => None,
        };
        if let Some(expected) = fixed_width
            && self.length != expected
        {
            return Err(PredicateError::WidthMismatch {
                attr_type: self.attr_type,
                expected,
                actual: self.length,
            });
        }

        if self.value.len() != self.length {
            return Err(PredicateError::ValueWidthMismatch {
                expected: self.length,
                actual: self.value.len(),
            });
        }

        Ok(())
    }

    /// Whether `record` satisfies the filter.
    pub(crate) fn matches(&self, record: &[u8]) -> bool {
        let Some(window_end) = self.offset.checked_add(self.length) else {
            return false;
        };
        let Some(window) = record.get(self.offset..window_end) else {
            return false;
        };

        let ordering = match self.attr_type {
            AttrType::Int => match (ne_i32(window), ne_i32(&self.value)) {
                (Some(attr), Some(value)) => Some(attr.cmp(&value)),
                _ => None,
            },
            AttrType::Float => match (ne_f32(window), ne_f32(&self.value)) {
                (Some(attr), Some(value)) => attr.partial_cmp(&value),
                _ => None,
            },
            AttrType::Bytes => Some(window.cmp(&self.value[..])),
        };

        match ordering {
            Some(ordering) => self.op.accepts(ordering),
            // NaN compares unequal to everything.
            None => self.op == CompOp::Ne,
        }
    }
}

fn ne_i32(bytes: &[u8]) -> Option<i32> {
    Some(i32::from_ne_bytes(bytes.try_into().ok()?))
}

fn ne_f32(bytes: &[u8]) -> Option<f32> {
    Some(f32::from_ne_bytes(bytes.try_into().ok()?))
}

/// What one locked walk over the current page produced.
struct PageWalk {
    /// The last slot the walk visited, matched or not.
    last_visited: Option<SlotNo>,
    /// Whether the walk stopped on a record satisfying the filter.
    matched: bool,
    /// The chain link of the page, read only when the page was exhausted.
    next_page: Option<PageNo>,
}

/// A forward scan cursor over a heap file.
///
/// The scan keeps at most one data page pinned and carries its position in
/// the underlying file's record cursor, so [`get_record`](Self::get_record)
/// and [`delete_record`](Self::delete_record) operate on the record the last
/// [`scan_next`](Self::scan_next) stopped at.
#[derive(Debug)]
pub struct HeapFileScan<F: FileManager> {
    heap: HeapFile<F>,
    predicate: Option<Predicate>,
    marked_page_no: Option<PageNo>,
    marked_rec: Option<Rid>,
}

impl<F: FileManager> HeapFileScan<F> {
    /// Opens the heap file at `path` and wraps it in a scan cursor.
    pub fn open(
        buffer: Arc<BufferManager<F>>,
        files: Arc<F>,
        catalog: &FileCatalog,
        path: impl AsRef<Path>,
    ) -> Result<Self, HeapError> {
        Ok(Self {
            heap: HeapFile::open(buffer, files, catalog, path)?,
            predicate: None,
            marked_page_no: None,
            marked_rec: None,
        })
    }

    /// Installs or clears the scan filter.
    ///
    /// `None` disables filtering. The filter is validated here and rejected
    /// with [`HeapError::BadScanParam`] when malformed. Changing the filter
    /// mid-scan does not reposition the cursor; it takes effect from the
    /// next [`scan_next`](Self::scan_next).
    pub fn start_scan(&mut self, filter: Option<Predicate>) -> Result<(), HeapError> {
        if let Some(predicate) = &filter {
            predicate.validate()?;
        }
        self.predicate = filter;
        Ok(())
    }

    /// Advances the cursor to the next record satisfying the filter.
    ///
    /// Returns `Ok(None)` once the chain is exhausted; the scan stays
    /// positioned so a later [`reset_scan`](Self::reset_scan) or
    /// [`end_scan`](Self::end_scan) still works. Fails with
    /// [`HeapError::NoRecords`] when the file has no data pages at all.
    ///
    /// The cursor advances over every visited record, matched or not, so a
    /// [`delete_record`](Self::delete_record) after an exhausted filter
    /// removes the last record the scan looked at.
    pub fn scan_next(&mut self) -> Result<Option<Rid>, HeapError> {
        let mut page_no = match self.heap.cur_page_no {
            Some(no) => no,
            None => {
                let Some(first) = self.heap.first_page()? else {
                    return Err(HeapError::NoRecords);
                };
                self.heap.pin_as_current(first)?;
                self.heap.cur_rec = None;
                first
            }
        };

        // One iteration per page; empty pages and long runs of non-matching
        // records stay in this loop instead of growing the stack.
        loop {
            let after = match self.heap.cur_rec {
                Some(rid) if rid.page_no == page_no => Some(rid.slot_no),
                _ => None,
            };

            let walk = self.walk_page(page_no, after)?;

            if let Some(slot_no) = walk.last_visited {
                self.heap.cur_rec = Some(Rid::new(page_no, slot_no));
            }

            if walk.matched {
                return Ok(self.heap.cur_rec);
            }

            let Some(next) = walk.next_page else {
                return Ok(None);
            };

            self.heap.unpin_current()?;
            self.heap.pin_as_current(next)?;
            self.heap.cur_rec = None;
            page_no = next;
        }
    }

    /// Returns a copy of the record under the cursor. The page stays pinned;
    /// the scan owns the pin.
    pub fn get_record(&self) -> Result<Vec<u8>, HeapError> {
        let Some(rid) = self.heap.cur_rec else {
            return Err(HeapError::NoCurrentRecord);
        };

        let record = self
            .heap
            .buffer()
            .with_page(self.heap.page_id(rid.page_no), |page| {
                page.row(rid.slot_no).map(<[u8]>::to_vec)
            })??;
        Ok(record)
    }

    /// Deletes the record under the cursor and decrements the file's record
    /// count. The cursor itself stays put; the next
    /// [`scan_next`](Self::scan_next) advances past the tombstone.
    pub fn delete_record(&mut self) -> Result<(), HeapError> {
        let Some(rid) = self.heap.cur_rec else {
            return Err(HeapError::NoCurrentRecord);
        };

        self.heap
            .buffer()
            .with_page_mut(self.heap.page_id(rid.page_no), |page| {
                page.delete_row(rid.slot_no)
            })??;
        self.heap.cur_dirty = true;

        self.heap.update_header(|header| {
            let rec_cnt = header.get_rec_cnt()?;
            header.set_rec_cnt(rec_cnt.saturating_sub(1))
        })?;
        Ok(())
    }

    /// Marks the current page as modified. Used after an upper layer mutated
    /// the record bytes it obtained from the scan.
    pub fn mark_dirty(&mut self) {
        self.heap.cur_dirty = true;
    }

    /// Captures the cursor position for a later
    /// [`reset_scan`](Self::reset_scan). Meaningful only after a successful
    /// [`scan_next`](Self::scan_next).
    pub fn mark_scan(&mut self) {
        self.marked_page_no = self.heap.cur_page_no;
        self.marked_rec = self.heap.cur_rec;
    }

    /// Rewinds the cursor to the position captured by
    /// [`mark_scan`](Self::mark_scan). When the mark lies on a different
    /// page, the current page is unpinned and the marked page pinned in its
    /// place.
    pub fn reset_scan(&mut self) -> Result<(), HeapError> {
        if self.marked_page_no == self.heap.cur_page_no {
            self.heap.cur_rec = self.marked_rec;
            return Ok(());
        }

        self.heap.unpin_current()?;
        if let Some(marked) = self.marked_page_no {
            self.heap.pin_as_current(marked)?;
        }
        self.heap.cur_rec = self.marked_rec;
        Ok(())
    }

    /// Releases the scan's data-page pin and clears the cursor. The scan may
    /// be started again from the beginning afterwards.
    pub fn end_scan(&mut self) -> Result<(), HeapError> {
        self.heap.unpin_current()?;
        self.heap.cur_rec = None;
        Ok(())
    }

    /// Total number of records in the file.
    pub fn rec_count(&self) -> Result<u32, HeapError> {
        self.heap.rec_count()
    }

    /// Walks the slot directory of `page_no` starting after `after`,
    /// evaluating the filter against each record under a single page lock.
    /// Stops at the first match or at the end of the page.
    fn walk_page(&self, page_no: PageNo, after: Option<SlotNo>) -> Result<PageWalk, HeapError> {
        let predicate = self.predicate.as_ref();

        let walk = self.heap.buffer().with_page(
            self.heap.page_id(page_no),
            |page| -> Result<PageWalk, PageError> {
                let mut cursor = match after {
                    Some(slot_no) => page.next_slot(slot_no)?,
                    None => page.first_slot()?,
                };

                let mut last_visited = None;
                while let Some(slot_no) = cursor {
                    last_visited = Some(slot_no);

                    let matched = match predicate {
                        None => true,
                        Some(p) => p.matches(page.row(slot_no)?),
                    };
                    if matched {
                        return Ok(PageWalk {
                            last_visited,
                            matched: true,
                            next_page: None,
                        });
                    }

                    cursor = page.next_slot(slot_no)?;
                }

                Ok(PageWalk {
                    last_visited,
                    matched: false,
                    next_page: page.next_page()?,
                })
            },
        )??;

        Ok(walk)
    }
}
