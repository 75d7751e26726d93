use crate::bin_error::BinaryError;

/// Integer types that can be stored as little-endian fields inside a byte
/// array. Implemented for the widths the storage layouts actually use.
pub trait LittleEndianInteger: Sized + Copy {
    /// Width of the field in bytes.
    const SIZE: usize;

    /// Decodes a value from a slice of exactly `Self::SIZE` bytes.
    fn from_le(source_bytes: &[u8]) -> Result<Self, BinaryError>;

    /// Encodes the value into a slice of exactly `Self::SIZE` bytes.
    fn to_le(self, target_buffer: &mut [u8]) -> Result<(), BinaryError>;
}

macro_rules! impl_little_endian_integer {
    ($t:ty) => {
        impl LittleEndianInteger for $t {
            const SIZE: usize = std::mem::size_of::<$t>();

            fn from_le(source_bytes: &[u8]) -> Result<Self, BinaryError> {
                if source_bytes.len() != Self::SIZE {
                    return Err(BinaryError::BytesSliceSizeMismatch {
                        // The caller sliced the field out already, so the offset
                        // within the surrounding array is unknown here.
                        from_offset: 0usize,
                        expected: Self::SIZE,
                    });
                }

                Ok(<$t>::from_le_bytes(source_bytes.try_into()?))
            }

            fn to_le(self, target_buffer: &mut [u8]) -> Result<(), BinaryError> {
                let self_bytes = &self.to_le_bytes();

                if self_bytes.len() != target_buffer.len() {
                    return Err(BinaryError::WriteErrorSliceSizeMismatch {
                        src: self_bytes.len(),
                        target: target_buffer.len(),
                    });
                }

                target_buffer.copy_from_slice(self_bytes);
                Ok(())
            }
        }
    };
}

impl_little_endian_integer!(u16);
impl_little_endian_integer!(u32);
impl_little_endian_integer!(u64);

/// Reads a `T` stored in little-endian order at `start_offset` within `bytes`.
///
/// Fails with `BinaryError::BytesSliceSizeMismatch` when the field range falls
/// outside the slice.
pub fn read_le<T: LittleEndianInteger>(
    bytes: &[u8],
    start_offset: usize,
) -> Result<T, BinaryError> {
    let Some(slice) = bytes.get(start_offset..start_offset + T::SIZE) else {
        return Err(BinaryError::BytesSliceSizeMismatch {
            expected: T::SIZE,
            from_offset: start_offset,
        });
    };

    T::from_le(slice)
}

/// Writes `value` in little-endian order at `start_offset` within `bytes`.
///
/// Fails with `BinaryError::BytesSliceSizeMismatch` when the field range falls
/// outside the slice.
pub fn write_le<T: LittleEndianInteger>(
    bytes: &mut [u8],
    start_offset: usize,
    value: T,
) -> Result<(), BinaryError> {
    let Some(slice) = bytes.get_mut(start_offset..start_offset + T::SIZE) else {
        return Err(BinaryError::BytesSliceSizeMismatch {
            expected: T::SIZE,
            from_offset: start_offset,
        });
    };

    value.to_le(slice)
}


#[cfg(test)]
mod write_le_tests {
    use super::*;

    #[test]
    fn writes_each_width_at_an_offset() {
        let mut buf = [0u8; 12];
        write_le::<u16>(&mut buf, 1, 0x1234u16).unwrap();
        assert_eq!(&buf[1..3], &[0x34u8, 0x12u8]);

        write_le::<u64>(&mut buf, 4, 0x1122334455667788u64).unwrap();
        assert_eq!(&buf[4..12], &0x1122334455667788u64.to_le_bytes());
    }

    #[test]
    fn write_round_trips_through_read() {
        let mut buf = [0u8; 8];
        write_le::<u32>(&mut buf, 2, 0xDEADBEEFu32).unwrap();
        assert_eq!(read_le::<u32>(&buf, 2).unwrap(), 0xDEADBEEF);
    }

    #[test]
    fn write_out_of_bounds_reports_offset_and_width() {
        let mut buf = [0u8; 3];
        let err = write_le::<u32>(&mut buf, 0, 1u32).unwrap_err();
        match err {
            BinaryError::BytesSliceSizeMismatch {
                expected,
                from_offset,
            } => {
                assert_eq!(expected, 4);
                assert_eq!(from_offset, 0);
            }
            other => panic!("unexpected error variant: {:?}", other),
        }
    }
}

#[cfg(test)]
mod trait_impl_tests {
    use super::*;

    #[test]
    fn from_le_rejects_a_wrong_size_slice() {
        let small = [1u8, 2u8];
        let err = <u32 as LittleEndianInteger>::from_le(&small).unwrap_err();
        assert!(matches!(
            err,
            BinaryError::BytesSliceSizeMismatch {
                expected: 4,
                from_offset: 0
            }
        ));
    }

    #[test]
    fn to_le_rejects_a_wrong_size_target() {
        let mut target = [0u8; 3];
        let err = <u32 as LittleEndianInteger>::to_le(0x11223344, &mut target).unwrap_err();
        assert!(matches!(
            err,
            BinaryError::WriteErrorSliceSizeMismatch { src: 4, target: 3 }
        ));
    }
}
