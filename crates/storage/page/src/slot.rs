use crate::errors::slot_error::SlotError;
use crate::page_id::SlotNo;
use binary_helpers::le::{read_le, write_le};

/// Fixed size of a slot directory entry in bytes.
pub const SLOT_SIZE: usize = 4;

/// A zero-copy read-only view into a 4-byte slot entry of the slot directory.
///
/// # Format
/// | Offset | Length |
/// |--------|--------|
/// | 0      | 2      |
///
/// Both fields are stored as `u16` in little-endian order. A zeroed entry
/// marks a deleted record; live records start past the page header, so a
/// zero offset can never belong to one.
#[derive(Debug)]
pub struct SlotRef<'a> {
    /// Logical index of the slot within the page.
    slot_no: SlotNo,
    /// View into the raw bytes of the entry.
    bytes: &'a [u8; SLOT_SIZE],
}

impl<'a> SlotRef<'a> {
    /// Creates a `SlotRef` from raw bytes and the slot number.
    /// The byte slice must be exactly `SLOT_SIZE` bytes.
    #[inline]
    pub(crate) fn from_raw(slot_no: SlotNo, bytes: &'a [u8]) -> Result<Self, SlotError> {
        let actual_size = bytes.len();
        let bytes = bytes.try_into().map_err(|_| SlotError::SlotSizeMismatch {
            expected_size: SLOT_SIZE,
            actual_size,
        })?;

        Ok(Self { slot_no, bytes })
    }

    /// The logical slot index.
    #[inline]
    pub(crate) fn slot_no(&self) -> SlotNo {
        self.slot_no
    }

    /// Byte offset of the record within the page.
    #[inline]
    pub(crate) fn offset(&self) -> Result<u16, SlotError> {
        Ok(read_le::<u16>(self.bytes, 0)?)
    }

    /// Length of the record in bytes. Zero for a deleted entry.
    #[inline]
    pub(crate) fn length(&self) -> Result<u16, SlotError> {
        Ok(read_le::<u16>(self.bytes, 2)?)
    }
}

/// A zero-copy mutable view into a 4-byte slot entry of the slot directory.
/// Same format as [`SlotRef`].
#[derive(Debug)]
pub struct SlotMut<'a> {
    /// Mutable view into the raw bytes of the entry.
    bytes: &'a mut [u8; SLOT_SIZE],
}

impl<'a> SlotMut<'a> {
    /// Creates a `SlotMut` from the raw bytes of one directory entry.
    /// The byte slice must be exactly `SLOT_SIZE` bytes.
    #[inline]
    pub(crate) fn from_raw(bytes: &'a mut [u8]) -> Result<Self, SlotError> {
        let actual_size = bytes.len();
        let bytes = bytes.try_into().map_err(|_| SlotError::SlotSizeMismatch {
            expected_size: SLOT_SIZE,
            actual_size,
        })?;

        Ok(Self { bytes })
    }

    /// Byte offset of the record within the page.
    #[inline]
    pub(crate) fn offset(&self) -> Result<u16, SlotError> {
        Ok(read_le::<u16>(self.bytes, 0)?)
    }

    /// Length of the record in bytes. Zero for a deleted entry.
    #[inline]
    pub(crate) fn length(&self) -> Result<u16, SlotError> {
        Ok(read_le::<u16>(self.bytes, 2)?)
    }

    /// Writes the record offset.
    #[inline]
    pub(crate) fn set_offset(&mut self, offset: u16) -> Result<(), SlotError> {
        Ok(write_le::<u16>(self.bytes, 0, offset)?)
    }

    /// Writes the record length.
    #[inline]
    pub(crate) fn set_length(&mut self, length: u16) -> Result<(), SlotError> {
        Ok(write_le::<u16>(self.bytes, 2, length)?)
    }
}
