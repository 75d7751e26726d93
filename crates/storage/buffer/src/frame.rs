use page::impls::Page;
use page::page_id::PageId;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU32};

/// The ID of a frame is just its index in the buffer's vector.
pub(crate) type FrameId = usize;

/// A buffer frame is a memory allocation holding the contents of one page,
/// along with the metadata the buffer manager needs to run its pin/unpin
/// protocol.
///
/// The `BufferFrame` owns its `Page`; the page is never moved out of the
/// frame, only borrowed through the manager's scoped accessors while a pin
/// is held.
#[derive(Debug)]
pub(crate) struct BufferFrame {
    /// The `PageId` of the page currently stored in this frame, or `None`
    /// for an empty frame.
    pub(crate) page_id: RwLock<Option<PageId>>,

    /// The actual `Page` instance.
    pub(crate) page: RwLock<Page>,

    /// Number of pins currently held on the page. A frame with a non-zero
    /// pin count is never evicted.
    pub(crate) pin_count: AtomicU32,

    /// Whether the frame content has diverged from disk. Set through the
    /// dirty flag of `unpin_page`, cleared on write-back.
    pub(crate) dirty: AtomicBool,
}

impl Default for BufferFrame {
    fn default() -> Self {
        Self {
            page_id: RwLock::new(None),
            page: RwLock::new(Page::new_zeroed(PageId::new(0, 0))),
            pin_count: AtomicU32::new(0),
            dirty: AtomicBool::new(false),
        }
    }
}
