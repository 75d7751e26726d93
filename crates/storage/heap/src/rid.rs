use page::page_id::{PageNo, SlotNo};
use std::fmt;

/// Identifies one record in a heap file: the data page it lives on and its
/// slot within that page.
///
/// A `Rid` stays valid for as long as the record exists; data pages never
/// move within the chain and deleted slots are never recycled. "No record"
/// is expressed as `Option<Rid>` rather than a sentinel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rid {
    /// Number of the data page holding the record.
    pub page_no: PageNo,

    /// Slot index of the record within its page.
    pub slot_no: SlotNo,
}

impl Rid {
    /// Creates a new record id from its parts.
    pub fn new(page_no: PageNo, slot_no: SlotNo) -> Self {
        Self { page_no, slot_no }
    }
}

impl fmt::Display for Rid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.page_no, self.slot_no)
    }
}
