//! Zero-copy views into the slot directory region of a slotted page.
//!
//! The slot directory grows **inward from the end of the page** toward the
//! beginning, so appending a slot never moves existing entries. Logical slot
//! index 0 therefore corresponds to the *last* `SLOT_SIZE` chunk of the
//! region, and indices increase leftwards:
//!
//! ```text
//!     physical_start = region_len - (slot_no + 1) * SLOT_SIZE
//!     physical_end   = physical_start + SLOT_SIZE
//! ```
//!
//! Both views borrow the region from the page; construction verifies the
//! region length is exactly `slot_count * SLOT_SIZE`.

use crate::errors::slot_error::SlotError;
use crate::page_id::SlotNo;
use crate::slot::{SLOT_SIZE, SlotMut, SlotRef};
use std::ops::Range;

/// Immutable zero-copy view into the slot directory of a page.
#[derive(Debug)]
pub(crate) struct SlotArrayRef<'a> {
    bytes: &'a [u8],
}

impl<'a> SlotArrayRef<'a> {
    /// Creates a new `SlotArrayRef`, validating the region length against the
    /// expected slot count.
    pub(crate) fn new(bytes: &'a [u8], slot_count: u16) -> Result<Self, SlotError> {
        let expected_len = slot_count as usize * SLOT_SIZE;

        if bytes.len() != expected_len {
            return Err(SlotError::SlotRegionSizeMismatch {
                expected_size: expected_len,
                actual_size: bytes.len(),
            });
        }

        Ok(Self { bytes })
    }

    /// Returns an immutable view of the slot at the given index.
    pub(crate) fn slot_ref(&self, slot_no: SlotNo) -> Result<SlotRef<'a>, SlotError> {
        let range = slot_range(self.bytes.len(), slot_no)?;

        let slot_bytes = self.bytes.get(range).ok_or(SlotError::InvalidSlot {
            slot_no: slot_no as usize,
        })?;

        SlotRef::from_raw(slot_no, slot_bytes)
    }
}

/// Mutable zero-copy view into the slot directory of a page.
#[derive(Debug)]
pub(crate) struct SlotArrayMut<'a> {
    bytes: &'a mut [u8],
}

impl<'a> SlotArrayMut<'a> {
    /// Creates a new `SlotArrayMut`, validating the region length against the
    /// expected slot count.
    pub(crate) fn new(bytes: &'a mut [u8], slot_count: u16) -> Result<Self, SlotError> {
        let expected_len = slot_count as usize * SLOT_SIZE;

        if bytes.len() != expected_len {
            return Err(SlotError::SlotRegionSizeMismatch {
                expected_size: expected_len,
                actual_size: bytes.len(),
            });
        }

        Ok(Self { bytes })
    }

    /// Returns a mutable view of the slot at the given index.
    pub(crate) fn slot_mut(&mut self, slot_no: SlotNo) -> Result<SlotMut<'_>, SlotError> {
        let range = slot_range(self.bytes.len(), slot_no)?;

        let slot_bytes = self.bytes.get_mut(range).ok_or(SlotError::InvalidSlot {
            slot_no: slot_no as usize,
        })?;

        SlotMut::from_raw(slot_bytes)
    }

    /// Writes both fields of the slot at the given index.
    pub(crate) fn set_slot(
        &mut self,
        slot_no: SlotNo,
        slot_offset: u16,
        slot_length: u16,
    ) -> Result<(), SlotError> {
        let mut slot = self.slot_mut(slot_no)?;
        slot.set_offset(slot_offset)?;
        slot.set_length(slot_length)?;
        Ok(())
    }
}

fn slot_start(region_len: usize, slot_no: SlotNo) -> Result<usize, SlotError> {
    region_len
        .checked_sub((slot_no as usize + 1) * SLOT_SIZE)
        .ok_or(SlotError::InvalidSlot {
            slot_no: slot_no as usize,
        })
}

fn slot_range(region_len: usize, slot_no: SlotNo) -> Result<Range<usize>, SlotError> {
    let start = slot_start(region_len, slot_no)?;
    Ok(start..(start + SLOT_SIZE))
}

#[cfg(test)]
mod slot_array_ref_tests {
    use super::*;

    #[test]
    fn new_rejects_a_region_of_the_wrong_size() {
        let bytes = vec![0u8; 10];
        let result = SlotArrayRef::new(&bytes, 3); // expects 12 bytes
        assert!(matches!(
            result,
            Err(SlotError::SlotRegionSizeMismatch {
                expected_size: 12,
                actual_size: 10
            })
        ));
    }

    #[test]
    fn slot_ref_rejects_an_out_of_range_index() {
        let bytes = vec![0u8; SLOT_SIZE * 2];
        let slot_array = SlotArrayRef::new(&bytes, 2).unwrap();
        assert!(matches!(
            slot_array.slot_ref(3),
            Err(SlotError::InvalidSlot { slot_no: 3 })
        ));
    }

    #[test]
    fn slot_indices_map_right_to_left() {
        let mut bytes = vec![0u8; SLOT_SIZE * 2];
        // slot 0 is the last chunk, slot 1 the one before it
        bytes[4..8].copy_from_slice(&[1, 0, 2, 0]); // offset=1, length=2
        bytes[0..4].copy_from_slice(&[3, 0, 4, 0]); // offset=3, length=4

        let slot_array = SlotArrayRef::new(&bytes, 2).unwrap();

        let slot0 = slot_array.slot_ref(0).unwrap();
        assert_eq!(slot0.offset().unwrap(), 1);
        assert_eq!(slot0.length().unwrap(), 2);

        let slot1 = slot_array.slot_ref(1).unwrap();
        assert_eq!(slot1.offset().unwrap(), 3);
        assert_eq!(slot1.length().unwrap(), 4);
    }
}
