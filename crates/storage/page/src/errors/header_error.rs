use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum HeaderError {
    #[error("error while interpreting header bytes")]
    BinaryError(#[from] binary_helpers::bin_error::BinaryError),
    #[error("header region expected to be {expected} bytes, but was {actual}")]
    RegionSize { expected: usize, actual: usize },
}
