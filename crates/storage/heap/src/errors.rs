use crate::rid::Rid;
use crate::scan::AttrType;
use binary_helpers::bin_error::BinaryError;
use buffer::errors::BufferError;
use file::errors::FileError;
use page::errors::page_error::PageError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the heap-file layer.
///
/// Validation failures and the empty-file signal are returned without side
/// effects; collaborator errors are relayed as-is. A full data page is never
/// surfaced: insertion consumes that signal by growing the page chain.
#[derive(Debug, Error)]
pub enum HeapError {
    /// `create_heap_file` found the file already on storage.
    #[error("heap file already exists: {path}")]
    FileExists { path: PathBuf },

    /// The record id addresses the header page, which never holds records.
    #[error("record id {rid} does not address a data page")]
    BadPageNo { rid: Rid },

    /// A scan filter failed validation.
    #[error("invalid scan predicate: {0}")]
    BadScanParam(#[from] PredicateError),

    /// The file's header lists no data pages, so there is nothing to scan.
    #[error("heap file has no data pages")]
    NoRecords,

    /// A cursor operation was called before any record was visited.
    #[error("the scan has no current record")]
    NoCurrentRecord,

    /// The heap-file header page holds bytes the codec cannot interpret.
    #[error("error while interpreting heap file header bytes")]
    HeaderCodec(#[from] BinaryError),

    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error(transparent)]
    Page(#[from] PageError),
}

/// Why a scan filter was rejected.
#[derive(Debug, Error)]
pub enum PredicateError {
    #[error("window length must be at least 1")]
    ZeroLength,

    #[error("{attr_type:?} filters require a {expected}-byte window, got {actual}")]
    WidthMismatch {
        attr_type: AttrType,
        expected: usize,
        actual: usize,
    },

    #[error("filter value is {actual} bytes but the window is {expected}")]
    ValueWidthMismatch { expected: usize, actual: usize },
}
