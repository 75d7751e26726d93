use crate::impls::Page;
use crate::page_id::PageId;
use crate::page_type::PageType;

mod chain_link_tests;

/// Helper methods for the test suite, available only in the test environment.
impl Page {
    /// Returns a new empty heap page for testing purposes.
    pub(crate) fn test_empty_heap() -> Page {
        Page::new_empty(PageId::new(1, 1), PageType::Heap).unwrap()
    }

    /// Inserts `count` rows of `len` bytes each; row `i` is filled with the
    /// byte value `i + 1`. Returns the slot numbers in insertion order.
    pub(crate) fn test_fill_rows(&mut self, count: usize, len: usize) -> Vec<u16> {
        (0..count)
            .map(|i| self.insert_row(&vec![(i + 1) as u8; len]).unwrap())
            .collect()
    }
}
