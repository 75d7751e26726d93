use crate::errors::delete_error::DeleteError;
use crate::impls::Page;
use crate::page_id::SlotNo;

/// Internal delete methods for the `Page` struct.
impl Page {
    /// Tombstones the slot entry at the given index.
    ///
    /// The record bytes stay where they are and the slot index is never
    /// handed out again, keeping every other record id on the page stable.
    pub(super) fn delete_row_internal(&mut self, slot_no: SlotNo) -> Result<(), DeleteError> {
        let mut slot_array = self.slot_array_mut()?;
        let mut slot = slot_array.slot_mut(slot_no)?;

        if slot.length()? == 0 {
            return Err(DeleteError::EmptySlot {
                slot_no: slot_no as usize,
            });
        }

        slot.set_length(0)?;
        slot.set_offset(0)?;

        Ok(())
    }
}
