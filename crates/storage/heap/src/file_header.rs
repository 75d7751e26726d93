//! Zero-copy views over the heap-file header stored on a file's first page.
//!
//! The fields live in the page's data region, past the generic page header,
//! so the page keeps its own layout metadata intact.

use binary_helpers::bin_error::BinaryError;
use binary_helpers::le::{read_le, write_le};
use page::page_id::PageNo;
use page::{HEADER_SIZE, PAGE_SIZE};
use paste::paste;

/// Sentinel stored in `first_page`/`last_page` while the file has no data
/// pages.
pub(crate) const NO_PAGE: PageNo = PageNo::MAX;

/// Bytes reserved for the null-padded copy of the file name.
pub(crate) const FILE_NAME_LEN: usize = 64;

const FILE_NAME: usize = HEADER_SIZE;

/// Immutable view over a heap file's header page.
#[derive(Debug)]
pub(crate) struct FileHeaderRef<'a> {
    bytes: &'a [u8; PAGE_SIZE],
}

impl<'a> FileHeaderRef<'a> {
    pub(crate) fn new(bytes: &'a [u8; PAGE_SIZE]) -> Self {
        Self { bytes }
    }

    /// The file name recorded at creation, informational only.
    pub(crate) fn file_name(&self) -> String {
        let field = &self.bytes[FILE_NAME..FILE_NAME + FILE_NAME_LEN];
        let end = field.iter().position(|b| *b == 0).unwrap_or(field.len());
        String::from_utf8_lossy(&field[..end]).into_owned()
    }
}

/// Mutable view over a heap file's header page.
#[derive(Debug)]
pub(crate) struct FileHeaderMut<'a> {
    bytes: &'a mut [u8; PAGE_SIZE],
}

impl<'a> FileHeaderMut<'a> {
    pub(crate) fn new(bytes: &'a mut [u8; PAGE_SIZE]) -> Self {
        Self { bytes }
    }

    /// Writes the header of a freshly created heap file: named, empty, no
    /// data pages.
    pub(crate) fn default(&mut self, file_name: &str) -> Result<(), BinaryError> {
        self.set_file_name(file_name);
        self.set_first_page(NO_PAGE)?;
        self.set_last_page(NO_PAGE)?;
        self.set_page_cnt(0)?;
        self.set_rec_cnt(0)?;
        Ok(())
    }

    /// Stores a null-padded copy of `name`, truncated to the field width
    /// with a terminating null byte kept.
    pub(crate) fn set_file_name(&mut self, name: &str) {
        let field = &mut self.bytes[FILE_NAME..FILE_NAME + FILE_NAME_LEN];
        field.fill(0);
        let len = name.len().min(FILE_NAME_LEN - 1);
        field[..len].copy_from_slice(&name.as_bytes()[..len]);
    }
}

/// Defines field offset constants and getter/setter methods, in the same
/// pattern the page crate uses for its page header.
macro_rules! impl_file_header_accessors {
    ( $( $field_name:ident : $field_type:ty = $field_offset:expr ; )* ) => {
        paste! {
            $(
                pub(crate) const [<$field_name:upper>] : usize = $field_offset;

                impl<'a> FileHeaderRef<'a> {
                    #[doc = concat!("Getter for field `", stringify!($field_name), "`.")]
                    pub(crate) fn [<get_ $field_name>](&self)
                        -> Result<$field_type, BinaryError>
                    {
                        read_le::<$field_type>(self.bytes, $field_offset)
                    }
                }

                impl<'a> FileHeaderMut<'a> {
                    #[doc = concat!("Getter for field `", stringify!($field_name), "`.")]
                    pub(crate) fn [<get_ $field_name>](&self)
                        -> Result<$field_type, BinaryError>
                    {
                        read_le::<$field_type>(self.bytes, $field_offset)
                    }

                    #[doc = concat!("Setter for field `", stringify!($field_name), "`.")]
                    pub(crate) fn [<set_ $field_name>](&mut self, val: $field_type)
                        -> Result<(), BinaryError>
                    {
                        write_le::<$field_type>(self.bytes, $field_offset, val)
                    }
                }
            )*
        }
    };
}

impl_file_header_accessors! {
    first_page : u32 = FILE_NAME + FILE_NAME_LEN;
    last_page  : u32 = FILE_NAME + FILE_NAME_LEN + 4;
    page_cnt   : u32 = FILE_NAME + FILE_NAME_LEN + 8;
    rec_cnt    : u32 = FILE_NAME + FILE_NAME_LEN + 12;
}
