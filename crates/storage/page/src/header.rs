//! Zero-copy views over the fixed header region at the front of every page.

use crate::errors::header_error::HeaderError;
use crate::page_id::PageNo;
use crate::page_type::PageType;
use crate::{HEADER_SIZE, PAGE_SIZE};
use binary_helpers::le::{read_le, write_le};
use paste::paste;

/// Sentinel stored in the `next_page` field of the last page of a chain.
pub const NO_NEXT_PAGE: PageNo = PageNo::MAX;

/// The `HeaderRef` struct provides an immutable view into the header of a page.
#[derive(Debug)]
pub struct HeaderRef<'a> {
    bytes: &'a [u8; HEADER_SIZE],
}

impl<'a> HeaderRef<'a> {
    /// Creates a new `HeaderRef` over a slice of exactly `HEADER_SIZE` bytes.
    pub fn new(bytes: &'a [u8]) -> Result<Self, HeaderError> {
        let bytes = bytes.try_into().map_err(|_| HeaderError::RegionSize {
            expected: HEADER_SIZE,
            actual: bytes.len(),
        })?;
        Ok(HeaderRef { bytes })
    }
}

/// The `HeaderMut` struct provides a mutable view into the header of a page.
#[derive(Debug)]
pub struct HeaderMut<'a> {
    bytes: &'a mut [u8; HEADER_SIZE],
}

impl<'a> HeaderMut<'a> {
    /// Creates a new `HeaderMut` over a slice of exactly `HEADER_SIZE` bytes.
    pub fn new(bytes: &'a mut [u8]) -> Result<Self, HeaderError> {
        let actual = bytes.len();
        let bytes = bytes.try_into().map_err(|_| HeaderError::RegionSize {
            expected: HEADER_SIZE,
            actual,
        })?;
        Ok(HeaderMut { bytes })
    }

    /// Writes the header fields of a freshly initialized page: no slots, the
    /// whole area between header and page end free, no next page.
    pub fn default(&mut self, page_number: PageNo, page_type: PageType) -> Result<(), HeaderError> {
        self.set_page_number(page_number)?;
        self.set_page_type(u16::from(page_type))?;
        self.set_slot_count(0)?;
        self.set_free_start(HEADER_SIZE as u16)?;
        self.set_free_end((PAGE_SIZE - 1) as u16)?;
        self.set_free_space((PAGE_SIZE - HEADER_SIZE) as u16)?;
        self.set_next_page(NO_NEXT_PAGE)?;
        Ok(())
    }
}

/// Defines header field constants and getter/setter methods.
///
/// Pattern: `field_id(identifier) : field_type(type) = field_offset(usize)`
///
/// Getters are generated for both views, setters only for `HeaderMut`.
macro_rules! impl_header_accessors {
    ( $( $field_name:ident : $field_type:ty = $field_offset:expr ; )* ) => {
        paste! {
            $(
                pub const [<$field_name:upper>] : usize = $field_offset;

                impl<'a> HeaderRef<'a> {
                    #[doc = concat!(
                        "Getter for field `", stringify!($field_name), "` ",
                        "(`", stringify!($field_type), "` at offset ", stringify!($field_offset), ")."
                    )]
                    pub fn [<get_ $field_name>](&self)
                        -> Result<$field_type, HeaderError>
                    {
                        Ok(read_le::<$field_type>(self.bytes, $field_offset)?)
                    }
                }

                impl<'a> HeaderMut<'a> {
                    #[doc = concat!(
                        "Getter for field `", stringify!($field_name), "` ",
                        "(`", stringify!($field_type), "` at offset ", stringify!($field_offset), ")."
                    )]
                    pub fn [<get_ $field_name>](&self)
                        -> Result<$field_type, HeaderError>
                    {
                        Ok(read_le::<$field_type>(self.bytes, $field_offset)?)
                    }

                    #[doc = concat!(
                        "Setter for field `", stringify!($field_name), "` ",
                        "(`", stringify!($field_type), "` at offset ", stringify!($field_offset), ")."
                    )]
                    pub fn [<set_ $field_name>](&mut self, val: $field_type)
                        -> Result<(), HeaderError>
                    {
                        write_le::<$field_type>(self.bytes, $field_offset, val)?;
                        Ok(())
                    }
                }
            )*
        }
    };
}

impl_header_accessors! {
    page_number : u32 = 0;
    page_type   : u16 = 4;
    slot_count  : u16 = 6;
    free_start  : u16 = 8;
    free_end    : u16 = 10;
    free_space  : u16 = 12;
    next_page   : u32 = 16;
}
