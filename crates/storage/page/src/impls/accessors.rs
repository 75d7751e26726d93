use crate::impls::Page;
use crate::page_id::PageId;

/// Accessor methods for the `Page` struct.
impl Page {
    /// Returns the unique identifier of the page.
    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    /// Sets the `PageId` field of the page instance.
    pub fn set_page_id(&mut self, page_id: PageId) {
        self.page_id = page_id;
    }
}
