use file::errors::FileError;
use page::page_id::PageId;
use thiserror::Error;

/// Buffer error.
#[derive(Debug, Error)]
pub enum BufferError {
    /// Every frame in the pool is pinned; nothing can be evicted.
    #[error("buffer pool is full: every frame is pinned")]
    BufferFull,
    /// The page is not resident with a pin, so it may not be accessed or
    /// unpinned.
    #[error("page {0} is not pinned in the buffer pool")]
    PageNotPinned(PageId),
    /// The backing file manager failed.
    #[error(transparent)]
    File(#[from] FileError),
}
