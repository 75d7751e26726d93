use std::convert::TryFrom;

/// Enumeration of the page types in the storage system.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageType {
    /// The first page of a heap file, carrying file-level metadata.
    FileHeader = 1,
    /// A slotted data page holding heap records.
    Heap = 2,
}

impl From<PageType> for u16 {
    fn from(p: PageType) -> Self {
        p as u16
    }
}

impl TryFrom<u16> for PageType {
    type Error = ();

    fn try_from(v: u16) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(PageType::FileHeader),
            2 => Ok(PageType::Heap),
            _ => Err(()),
        }
    }
}
