//! Buffer management module for the storage system.
//!
//! The buffer manager caches pages in a fixed pool of frames and hands out
//! access to them under an explicit pin/unpin protocol: a pinned page cannot
//! be evicted, and the dirty flag passed at unpin time decides whether the
//! frame is written back before its frame is reused.

pub mod buffer;
pub mod errors;
mod frame;
