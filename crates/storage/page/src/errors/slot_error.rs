use crate::errors::header_error::HeaderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum SlotError {
    #[error("slot directory region expected to be {expected_size} bytes, but was {actual_size}")]
    SlotRegionSizeMismatch {
        expected_size: usize,
        actual_size: usize,
    },
    #[error("attempted to read a slot entry of {actual_size} bytes, expected {expected_size}")]
    SlotSizeMismatch {
        expected_size: usize,
        actual_size: usize,
    },
    #[error("attempted to access an invalid slot index: {slot_no}")]
    InvalidSlot { slot_no: usize },
    #[error("error while interpreting binary data")]
    BinaryError(#[from] binary_helpers::bin_error::BinaryError),
    #[error("error while reading page header")]
    HeaderError(#[from] HeaderError),
}
