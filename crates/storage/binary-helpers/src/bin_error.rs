use std::array::TryFromSliceError;
use thiserror::Error;

/// Errors produced while reading or writing binary fields.
#[derive(Error, Debug)]
pub enum BinaryError {
    /// The requested range does not fit inside the provided slice.
    #[error("attempt to access {expected} bytes at offset {from_offset}, beyond the end of the slice")]
    BytesSliceSizeMismatch { expected: usize, from_offset: usize },
    /// A slice could not be converted into a fixed-size array.
    #[error("error converting a slice")]
    SliceConversionError(#[from] TryFromSliceError),
    /// The source and target sizes of a write do not agree.
    #[error("size mismatch while writing binary data: source {src} vs target {target}")]
    WriteErrorSliceSizeMismatch { src: usize, target: usize },
}
