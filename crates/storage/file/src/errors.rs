use page::page_id::{FileId, PageId};
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by file managers.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("file {file_id} is not registered in the catalog")]
    NotRegistered { file_id: FileId },
    #[error("file already exists: {path}")]
    AlreadyExists { path: PathBuf },
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },
    #[error("file {file_id} is not open")]
    NotOpen { file_id: FileId },
    #[error("file {file_id} is still open and cannot be destroyed")]
    StillOpen { file_id: FileId },
    #[error("file {file_id} has no pages")]
    NoPages { file_id: FileId },
    #[error("page {page_id} is beyond the end of its file")]
    PageOutOfBounds { page_id: PageId },
    #[error("i/o error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
