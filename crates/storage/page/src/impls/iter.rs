use crate::errors::slot_error::SlotError;
use crate::impls::Page;
use crate::page_id::SlotNo;

/// Internal slot iteration methods for the `Page` struct.
impl Page {
    /// The lowest slot index holding a live record.
    pub(super) fn first_slot_internal(&self) -> Result<Option<SlotNo>, SlotError> {
        self.scan_slots_from(0)
    }

    /// The lowest live slot index strictly greater than `after`. The entry at
    /// `after` itself may already be a tombstone.
    pub(super) fn next_slot_internal(&self, after: SlotNo) -> Result<Option<SlotNo>, SlotError> {
        let Some(start) = after.checked_add(1) else {
            return Ok(None);
        };
        self.scan_slots_from(start)
    }

    fn scan_slots_from(&self, start: SlotNo) -> Result<Option<SlotNo>, SlotError> {
        let slot_count = self.header_ref()?.get_slot_count()?;
        let slot_array = self.slot_array_ref()?;

        for slot_no in start..slot_count {
            let slot = slot_array.slot_ref(slot_no)?;
            if self.is_slot_live(&slot)? {
                return Ok(Some(slot_no));
            }
        }

        Ok(None)
    }
}
