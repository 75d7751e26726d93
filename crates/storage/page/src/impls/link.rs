use crate::errors::header_error::HeaderError;
use crate::header::NO_NEXT_PAGE;
use crate::impls::Page;
use crate::page_id::PageNo;

/// Internal chain-link methods for the `Page` struct.
impl Page {
    pub(super) fn next_page_internal(&self) -> Result<Option<PageNo>, HeaderError> {
        let raw = self.header_ref()?.get_next_page()?;
        Ok((raw != NO_NEXT_PAGE).then_some(raw))
    }

    pub(super) fn set_next_page_internal(&mut self, next: Option<PageNo>) -> Result<(), HeaderError> {
        self.header_mut()?.set_next_page(next.unwrap_or(NO_NEXT_PAGE))
    }
}
