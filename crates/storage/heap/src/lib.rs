//! Heap files: unordered collections of variable-length records.
//!
//! A heap file is a chain of slotted data pages headed by a metadata page.
//! Records are addressed by [`Rid`] and never move once inserted; deleted
//! slots are left as tombstones so ids stay stable. The crate exposes three
//! access paths on top of the buffer manager's pin/unpin protocol:
//!
//! - [`HeapFile`]: open/close lifecycle and point lookup by record id
//! - [`HeapFileScan`]: forward iteration with an optional typed filter,
//!   mark/reset repositioning and delete-at-cursor
//! - [`InsertFileScan`]: append-only insertion, growing the page chain as
//!   pages fill up
//!
//! At most one data page is pinned per open instance at any time, next to
//! the always-pinned header page.

pub mod errors;

mod file_header;

/// Heap file lifecycle and point lookup.
pub mod heap_file;

/// Append-only insertion cursor.
pub mod insert;

/// Record identifiers.
pub mod rid;

/// Filtered sequential scans.
pub mod scan;

pub use errors::HeapError;
pub use heap_file::{HeapFile, create_heap_file, destroy_heap_file};
pub use insert::InsertFileScan;
pub use rid::Rid;
pub use scan::{AttrType, CompOp, HeapFileScan, Predicate};

#[cfg(test)]
mod tests;
