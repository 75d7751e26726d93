use crate::errors::delete_error::DeleteError;
use crate::errors::header_error::HeaderError;
use crate::errors::insert_error::InsertError;
use crate::errors::read_row_error::ReadRowError;
use crate::errors::slot_error::SlotError;
use thiserror::Error;

/// Aggregator error type for all possible page related sub-errors
#[derive(Debug, Error)]
pub(crate) enum PageOpError {
    #[error("error while accessing header")]
    Header(#[from] HeaderError),
    #[error("error while accessing slot directory")]
    Slot(#[from] SlotError),
    #[error("error while reading row")]
    ReadRow(#[from] ReadRowError),
    #[error("error while inserting row")]
    Insert(#[from] InsertError),
    #[error("error while deleting row")]
    DeleteRow(#[from] DeleteError),
}
