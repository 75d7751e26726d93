use crate::errors::read_row_error::ReadRowError;
use crate::impls::Page;
use crate::page_id::SlotNo;

/// Internal row access methods for the `Page` struct.
impl Page {
    /// Retrieves a record by its slot index.
    /// Returns a slice of bytes representing the record payload.
    pub(super) fn read_row_internal(&self, slot_no: SlotNo) -> Result<&[u8], ReadRowError> {
        let slot_array = self.slot_array_ref()?;
        let slot = slot_array.slot_ref(slot_no)?;

        let (offset, length) = (slot.offset()? as usize, slot.length()? as usize);

        if length == 0 {
            return Err(ReadRowError::EmptySlot {
                slot_no: slot_no as usize,
            });
        }

        Ok(&self.data[offset..offset + length])
    }
}
