//! Decoder for uncompressed (`PLAIN`) blocks.
//!
//! A plain block has no header: values are laid out back-to-back until the
//! bytes run out.
//!
//! | Type       | Layout                                             |
//! |------------|----------------------------------------------------|
//! | `bool`     | 1 byte, non-zero is `true`                         |
//! | `i32`      | zigzag varint                                      |
//! | `i64`      | 8 bytes big-endian                                 |
//! | `f32`      | 4 bytes big-endian IEEE-754                        |
//! | `f64`      | 8 bytes big-endian IEEE-754                        |
//! | `&[u8]`    | 4-byte big-endian signed length, then the bytes    |

use std::marker::PhantomData;

use crate::decoder::{assert_has_next, assert_not_initialized, Decoder};
use crate::error::{DecodeError, DecodeResult};
use crate::kernels::ByteCursor;
use crate::types::TsDataType;

/// A value with a plain on-disk representation.
pub trait PlainValue<'a>: Sized {
    const DATA_TYPE: TsDataType;

    fn read_plain(cursor: &mut ByteCursor<'a>) -> DecodeResult<Self>;
}

impl<'a> PlainValue<'a> for bool {
    const DATA_TYPE: TsDataType = TsDataType::Boolean;

    fn read_plain(cursor: &mut ByteCursor<'a>) -> DecodeResult<Self> {
        Ok(cursor.read_u8()? != 0)
    }
}

impl<'a> PlainValue<'a> for i32 {
    const DATA_TYPE: TsDataType = TsDataType::Int32;

    fn read_plain(cursor: &mut ByteCursor<'a>) -> DecodeResult<Self> {
        cursor.read_signed_varint_i32()
    }
}

impl<'a> PlainValue<'a> for i64 {
    const DATA_TYPE: TsDataType = TsDataType::Int64;

    fn read_plain(cursor: &mut ByteCursor<'a>) -> DecodeResult<Self> {
        cursor.read_i64_be()
    }
}

impl<'a> PlainValue<'a> for f32 {
    const DATA_TYPE: TsDataType = TsDataType::Float;

    fn read_plain(cursor: &mut ByteCursor<'a>) -> DecodeResult<Self> {
        cursor.read_u32_be().map(f32::from_bits)
    }
}

impl<'a> PlainValue<'a> for f64 {
    const DATA_TYPE: TsDataType = TsDataType::Double;

    fn read_plain(cursor: &mut ByteCursor<'a>) -> DecodeResult<Self> {
        cursor.read_u64_be().map(f64::from_bits)
    }
}

impl<'a> PlainValue<'a> for &'a [u8] {
    const DATA_TYPE: TsDataType = TsDataType::Text;

    fn read_plain(cursor: &mut ByteCursor<'a>) -> DecodeResult<Self> {
        let len = cursor.read_i32_be()?;
        let len = usize::try_from(len).map_err(|_| {
            DecodeError::MalformedStream(format!("negative binary length {}", len))
        })?;
        cursor.read_bytes(len)
    }
}

/// Decodes values of type `T` from a `PLAIN` block.
#[derive(Debug)]
pub struct PlainDecoder<'a, T> {
    cursor: ByteCursor<'a>,
    initialized: bool,
    _value: PhantomData<fn() -> T>,
}

impl<'a, T: PlainValue<'a>> Default for PlainDecoder<'a, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: PlainValue<'a>> PlainDecoder<'a, T> {
    pub fn new() -> Self {
        Self {
            cursor: ByteCursor::new(&[]),
            initialized: false,
            _value: PhantomData,
        }
    }

    pub fn data_type(&self) -> TsDataType {
        T::DATA_TYPE
    }
}

impl<'a, T: PlainValue<'a>> Decoder<'a> for PlainDecoder<'a, T> {
    type Value = T;

    fn init(&mut self, data: ByteCursor<'a>) -> DecodeResult<()> {
        assert_not_initialized(self.initialized, "PlainDecoder");
        self.cursor = data;
        self.initialized = true;
        Ok(())
    }

    fn has_next(&self) -> bool {
        !self.cursor.is_exhausted()
    }

    /// # Panics
    /// If `has_next()` is `false`.
    fn next(&mut self) -> DecodeResult<T> {
        assert_has_next(self.has_next(), "PlainDecoder");
        // Read on a copy so a value that fails halfway leaves the position alone.
        let mut probe = self.cursor;
        let value = T::read_plain(&mut probe)?;
        self.cursor = probe;
        Ok(value)
    }

    /// The count is not stored; it is only known once the bytes run out.
    fn remaining_len(&self) -> Option<usize> {
        if self.cursor.is_exhausted() {
            Some(0)
        } else {
            None
        }
    }

    fn trailing_bytes(&self) -> usize {
        self.cursor.len_remaining()
    }
}

//==================================================================================
// Unit Tests
//==================================================================================
