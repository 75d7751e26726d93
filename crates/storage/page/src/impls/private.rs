use super::Page;
use crate::PAGE_SIZE;
use crate::errors::slot_error::SlotError;
use crate::slot::SlotRef;
use crate::slot_array::{SlotArrayMut, SlotArrayRef};

/// Private methods for the `Page` struct.
impl Page {
    /// Returns an immutable view of the slot directory.
    #[inline]
    pub(crate) fn slot_array_ref(&'_ self) -> Result<SlotArrayRef<'_>, SlotError> {
        let free_end_offset = self.header_ref()?.get_free_end()? as usize;
        let slot_count = self.header_ref()?.get_slot_count()?;
        SlotArrayRef::new(&self.data[free_end_offset + 1..PAGE_SIZE], slot_count)
    }

    /// Returns a mutable view of the slot directory.
    #[inline]
    pub(crate) fn slot_array_mut(&'_ mut self) -> Result<SlotArrayMut<'_>, SlotError> {
        let free_end_offset = self.header_ref()?.get_free_end()? as usize;
        let slot_count = self.header_ref()?.get_slot_count()?;
        SlotArrayMut::new(&mut self.data[free_end_offset + 1..PAGE_SIZE], slot_count)
    }

    /// A live slot references a record; a zeroed entry is a tombstone.
    /// Live records always start past the header, so offset 0 cannot occur.
    #[inline]
    pub(super) fn is_slot_live(&self, slot: &SlotRef<'_>) -> Result<bool, SlotError> {
        Ok(slot.length()? != 0 && slot.offset()? != 0)
    }
}
