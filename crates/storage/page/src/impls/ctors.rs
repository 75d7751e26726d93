use crate::PAGE_SIZE;
use crate::errors::header_error::HeaderError;
use crate::errors::page_error::{PageResult, WithPageId};
use crate::errors::page_op_error::PageOpError;
use crate::impls::Page;
use crate::page_id::PageId;
use crate::page_type::PageType;

/// Methods for creating and initializing pages.
impl Page {
    /// Creates a new page with all bytes initialized to zero.
    pub fn new_zeroed(page_id: PageId) -> Self {
        Self {
            page_id,
            data: Box::new([0; PAGE_SIZE]),
        }
    }

    /// Creates a new, initialized, empty page of the given type.
    pub fn new_empty(page_id: PageId, page_type: PageType) -> PageResult<Self> {
        let mut page = Self::new_zeroed(page_id);
        page.initialize(page_id, page_type)?;
        Ok(page)
    }

    /// Initializes the page for the given `PageId` and `PageType`.
    ///
    /// Wipes the full byte array and writes a fresh header: no slots, no next
    /// page, everything between header and page end free.
    pub fn initialize(&mut self, page_id: PageId, page_type: PageType) -> PageResult<()> {
        self.data.fill(0);
        self.page_id = page_id;

        self.initialize_internal(page_id, page_type)
            .map_err(PageOpError::Header)
            .with_page_id(page_id)
    }

    fn initialize_internal(
        &mut self,
        page_id: PageId,
        page_type: PageType,
    ) -> Result<(), HeaderError> {
        self.header_mut()?.default(page_id.page_number, page_type)
    }
}

#[cfg(test)]
mod ctor_tests {
    use super::*;
    use crate::HEADER_SIZE;
    use crate::header::NO_NEXT_PAGE;

    #[test]
    fn new_empty_writes_a_default_header() {
        let page_id = PageId::new(1, 3);
        let page = Page::new_empty(page_id, PageType::Heap).unwrap();

        assert_eq!(page.page_id(), page_id);

        let header = page.header_ref().unwrap();
        assert_eq!(header.get_page_number().unwrap(), 3);
        assert_eq!(header.get_page_type().unwrap(), u16::from(PageType::Heap));
        assert_eq!(header.get_slot_count().unwrap(), 0);
        assert_eq!(header.get_free_start().unwrap() as usize, HEADER_SIZE);
        assert_eq!(header.get_next_page().unwrap(), NO_NEXT_PAGE);
    }

    #[test]
    fn initialize_wipes_previous_contents() {
        let old_id = PageId::new(1, 1);
        let mut page = Page::new_empty(old_id, PageType::Heap).unwrap();
        page.insert_row(&[7u8; 16]).unwrap();

        let new_id = PageId::new(1, 2);
        page.initialize(new_id, PageType::Heap).unwrap();

        assert_eq!(page.page_id(), new_id);
        assert_eq!(page.slot_count().unwrap(), 0);
        assert_eq!(page.first_slot().unwrap(), None);
        assert!(page.data()[HEADER_SIZE..].iter().all(|b| *b == 0));
    }
}
