//! Provides the implementation for the main buffer leveraged by the engine.

use crate::errors::BufferError;
use crate::frame::{BufferFrame, FrameId};
use file::api::FileManager;
use page::impls::Page;
use page::page_id::{FileId, PageId, PageNo};
use std::collections::HashMap;
use std::sync::atomic::Ordering;
use std::sync::{Arc, RwLock};

/// The buffer manager responsible for the cache pool of pages.
///
/// Pages enter the pool through [`alloc_page`](Self::alloc_page) and
/// [`pin_page`](Self::pin_page), both of which leave the page pinned for the
/// caller. While pinned, the page content is reachable through
/// [`with_page`](Self::with_page) and [`with_page_mut`](Self::with_page_mut);
/// the closure keeps the frame borrow from outliving the pin. A matching
/// [`unpin_page`](Self::unpin_page) releases the pin and records whether the
/// frame diverged from disk. Only unpinned frames are eviction candidates.
#[derive(Debug)]
pub struct BufferManager<F: FileManager> {
    file_manager: Arc<F>,
    page_map: RwLock<HashMap<PageId, FrameId>>,
    frames: Vec<BufferFrame>,
}

impl<F: FileManager> BufferManager<F> {
    /// Creates a new empty buffer manager with a pool of `pool_size` frames.
    pub fn new(file_manager: Arc<F>, pool_size: usize) -> Self {
        let mut frames = Vec::with_capacity(pool_size);
        for _ in 0..pool_size {
            frames.push(BufferFrame::default());
        }
        Self {
            file_manager,
            frames,
            page_map: RwLock::new(HashMap::new()),
        }
    }

    /// Allocates a new page at the end of `file_id` and pins it.
    ///
    /// The frame mirrors the zeroed page the file manager appended; the
    /// caller is responsible for initializing the page layout before use.
    ///
    /// # Returns
    /// The number of the freshly allocated page, pinned once.
    pub fn alloc_page(&self, file_id: FileId) -> Result<PageNo, BufferError> {
        let page_no = self.file_manager.allocate_page(file_id)?;
        let page_id = PageId::new(file_id, page_no);

        let mut map = self.page_map.write().unwrap();
        let frame_id = self.claim_frame(&mut map, page_id)?;

        {
            let mut page = self.frames[frame_id].page.write().unwrap();
            page.data_mut().fill(0);
            page.set_page_id(page_id);
        }

        map.insert(page_id, frame_id);
        Ok(page_no)
    }

    /// Pins the page identified by `page_id`, loading it from disk when it is
    /// not already resident.
    ///
    /// Pins nest: each call must eventually be matched by an
    /// [`unpin_page`](Self::unpin_page).
    pub fn pin_page(&self, page_id: PageId) -> Result<(), BufferError> {
        let mut map = self.page_map.write().unwrap();

        // Cache hit: the page keeps whatever content and dirtiness it has.
        if let Some(&frame_id) = map.get(&page_id) {
            self.frames[frame_id].pin_count.fetch_add(1, Ordering::Relaxed);
            return Ok(());
        }

        let frame_id = self.claim_frame(&mut map, page_id)?;

        {
            let mut page = self.frames[frame_id].page.write().unwrap();
            if let Err(e) = self.file_manager.read_page(page_id, page.data_mut()) {
                // Roll the claim back so the frame stays reusable.
                *self.frames[frame_id].page_id.write().unwrap() = None;
                self.frames[frame_id].pin_count.store(0, Ordering::Relaxed);
                return Err(e.into());
            }
            page.set_page_id(page_id);
        }

        map.insert(page_id, frame_id);
        Ok(())
    }

    /// Releases one pin on `page_id`. When `dirty` is set, the frame is
    /// marked as diverged from disk; the flag accumulates across the pin
    /// lifetime and is only cleared by a write-back.
    pub fn unpin_page(&self, page_id: PageId, dirty: bool) -> Result<(), BufferError> {
        let map = self.page_map.read().unwrap();
        let frame_id = self.pinned_frame(&map, page_id)?;
        let frame = &self.frames[frame_id];

        if dirty {
            frame.dirty.store(true, Ordering::Relaxed);
        }
        frame.pin_count.fetch_sub(1, Ordering::Relaxed);
        Ok(())
    }

    /// Runs `f` with shared access to the pinned page `page_id`.
    ///
    /// Fails with [`BufferError::PageNotPinned`] when the caller does not
    /// hold a pin on the page.
    pub fn with_page<T>(
        &self,
        page_id: PageId,
        f: impl FnOnce(&Page) -> T,
    ) -> Result<T, BufferError> {
        let frame_id = {
            let map = self.page_map.read().unwrap();
            self.pinned_frame(&map, page_id)?
        };

        let page = self.frames[frame_id].page.read().unwrap();
        Ok(f(&page))
    }

    /// Runs `f` with exclusive access to the pinned page `page_id`.
    ///
    /// Mutating the page does not mark the frame dirty by itself; the caller
    /// reports dirtiness through the flag of [`unpin_page`](Self::unpin_page).
    pub fn with_page_mut<T>(
        &self,
        page_id: PageId,
        f: impl FnOnce(&mut Page) -> T,
    ) -> Result<T, BufferError> {
        let frame_id = {
            let map = self.page_map.read().unwrap();
            self.pinned_frame(&map, page_id)?
        };

        let mut page = self.frames[frame_id].page.write().unwrap();
        Ok(f(&mut page))
    }

    /// Writes every dirty resident page of `file_id` back to disk.
    pub fn flush_file(&self, file_id: FileId) -> Result<(), BufferError> {
        let resident: Vec<(PageId, FrameId)> = {
            let map = self.page_map.read().unwrap();
            map.iter()
                .filter(|(page_id, _)| page_id.file_id == file_id)
                .map(|(page_id, frame_id)| (*page_id, *frame_id))
                .collect()
        };

        for (page_id, frame_id) in resident {
            self.flush_frame(page_id, frame_id)?;
        }
        Ok(())
    }

    /// Returns the number of pins currently held on `page_id`, zero when the
    /// page is not resident. Diagnostic probe used to verify pin discipline.
    pub fn pin_count(&self, page_id: PageId) -> u32 {
        let map = self.page_map.read().unwrap();
        match map.get(&page_id) {
            Some(&frame_id) => self.frames[frame_id].pin_count.load(Ordering::Relaxed),
            None => 0,
        }
    }

    /// Resolves `page_id` to its frame, requiring at least one pin.
    fn pinned_frame(
        &self,
        map: &HashMap<PageId, FrameId>,
        page_id: PageId,
    ) -> Result<FrameId, BufferError> {
        let Some(&frame_id) = map.get(&page_id) else {
            return Err(BufferError::PageNotPinned(page_id));
        };
        if self.frames[frame_id].pin_count.load(Ordering::Relaxed) == 0 {
            return Err(BufferError::PageNotPinned(page_id));
        }
        Ok(frame_id)
    }

    /// Finds a frame for `for_page_id` and pins it once.
    ///
    /// Prefers an empty frame; otherwise evicts the first unpinned resident
    /// page, writing it back first when dirty. Fails with
    /// [`BufferError::BufferFull`] when every frame is pinned.
    ///
    /// The caller holds the map write lock, which keeps the chosen victim
    /// from being re-pinned mid-eviction.
    fn claim_frame(
        &self,
        map: &mut HashMap<PageId, FrameId>,
        for_page_id: PageId,
    ) -> Result<FrameId, BufferError> {
        // First pass: an empty frame.
        for (frame_id, frame) in self.frames.iter().enumerate() {
            let mut frame_page_id = frame.page_id.write().unwrap();
            if frame_page_id.is_none() {
                *frame_page_id = Some(for_page_id);
                frame.pin_count.store(1, Ordering::Relaxed);
                frame.dirty.store(false, Ordering::Relaxed);
                return Ok(frame_id);
            }
        }

        // Second pass: evict the first unpinned resident page.
        for (frame_id, frame) in self.frames.iter().enumerate() {
            let mut frame_page_id = frame.page_id.write().unwrap();
            let Some(victim) = *frame_page_id else {
                continue;
            };
            if frame.pin_count.load(Ordering::Relaxed) != 0 {
                continue;
            }

            if frame.dirty.load(Ordering::Relaxed) {
                let page = frame.page.read().unwrap();
                if let Err(e) = self.file_manager.write_page(victim, page.data()) {
                    return Err(e.into());
                }
                frame.dirty.store(false, Ordering::Relaxed);
            }

            map.remove(&victim);
            *frame_page_id = Some(for_page_id);
            frame.pin_count.store(1, Ordering::Relaxed);
            frame.dirty.store(false, Ordering::Relaxed);
            return Ok(frame_id);
        }

        Err(BufferError::BufferFull)
    }

    fn flush_frame(&self, page_id: PageId, frame_id: FrameId) -> Result<(), BufferError> {
        let frame = &self.frames[frame_id];
        if !frame.dirty.load(Ordering::Relaxed) {
            return Ok(());
        }

        let page = frame.page.read().unwrap();
        self.file_manager.write_page(page_id, page.data())?;
        frame.dirty.store(false, Ordering::Relaxed);
        Ok(())
    }
}

// ------------------------------------------------------------------------------------------------
