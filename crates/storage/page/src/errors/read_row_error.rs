use crate::errors::slot_error::SlotError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum ReadRowError {
    #[error("slot {slot_no} holds no record")]
    EmptySlot { slot_no: usize },
    #[error("error while reading slot directory")]
    SlotError(#[from] SlotError),
}
