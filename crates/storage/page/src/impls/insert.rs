use crate::errors::insert_error::InsertError;
use crate::impls::Page;
use crate::page_id::SlotNo;
use crate::slot::SLOT_SIZE;

/// Internal insert methods for the `Page` struct.
impl Page {
    /// Places a record at `free_start` and appends a new slot directory entry
    /// for it.
    ///
    /// Deleted slots are never recycled and freed record space is never
    /// reclaimed, so the free region is always the single contiguous span
    /// between `free_start` and `free_end`. That keeps the space check a
    /// plain comparison against `free_space`.
    pub(super) fn insert_row_internal(&mut self, row: &[u8]) -> Result<SlotNo, InsertError> {
        if row.is_empty() {
            // A zero-length entry is indistinguishable from a tombstone.
            return Err(InsertError::EmptyRow);
        }

        let (slot_count, free_start, free_space) = {
            let header = self.header_ref()?;
            (
                header.get_slot_count()?,
                header.get_free_start()?,
                header.get_free_space()?,
            )
        };

        let required = row.len() + SLOT_SIZE;
        if (free_space as usize) < required {
            return Err(InsertError::NotEnoughSpace {
                row_len: row.len(),
                page_free_space: free_space as usize,
            });
        }

        let slot_no: SlotNo = slot_count;
        let start_offset = free_start as usize;

        {
            let mut header = self.header_mut()?;
            header.set_slot_count(slot_count + 1)?;
            header.set_free_start(free_start + row.len() as u16)?;
            let free_end = header.get_free_end()?;
            header.set_free_end(free_end - SLOT_SIZE as u16)?;
            header.set_free_space(free_space - required as u16)?;
        }

        self.data[start_offset..start_offset + row.len()].copy_from_slice(row);

        // The header now accounts for the new entry, so the directory view
        // includes its byte range.
        self.slot_array_mut()?
            .set_slot(slot_no, start_offset as u16, row.len() as u16)?;

        Ok(slot_no)
    }
}
