//! A forward-only reader over an in-memory byte block.
//!
//! `ByteCursor` is a plain value: a borrowed slice and a read position. It is
//! moved into whichever decoder reads it. A nested decoder receives a
//! `remaining()` view and never aliases its parent's position.
//!
//! Fixed-width reads are big-endian, the file format's convention. A read that
//! fails leaves the position untouched.

use num_traits::{PrimInt, Unsigned};

use crate::error::{DecodeError, DecodeResult};
use crate::kernels::{leb128, zigzag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left to read.
    pub fn len_remaining(&self) -> usize {
        self.data.len() - self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.len_remaining() == 0
    }

    /// A new cursor over the unread suffix, sharing the same storage.
    ///
    /// The parent cursor does not move.
    pub fn remaining(&self) -> ByteCursor<'a> {
        ByteCursor::new(&self.data[self.position..])
    }

    fn unread(&self) -> &'a [u8] {
        &self.data[self.position..]
    }

    /// Borrows the next `n` bytes and advances past them.
    pub fn read_bytes(&mut self, n: usize) -> DecodeResult<&'a [u8]> {
        let available = self.len_remaining();
        if n > available {
            return Err(DecodeError::truncated(n, available));
        }
        let bytes = &self.data[self.position..self.position + n];
        self.position += n;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(bytes);
        Ok(array)
    }

    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    pub fn read_u32_be(&mut self) -> DecodeResult<u32> {
        self.read_array().map(u32::from_be_bytes)
    }

    pub fn read_u64_be(&mut self) -> DecodeResult<u64> {
        self.read_array().map(u64::from_be_bytes)
    }

    pub fn read_i32_be(&mut self) -> DecodeResult<i32> {
        self.read_array().map(i32::from_be_bytes)
    }

    pub fn read_i64_be(&mut self) -> DecodeResult<i64> {
        self.read_array().map(i64::from_be_bytes)
    }

    /// Reads a LEB128 unsigned varint into `T`.
    ///
    /// # Errors
    /// `TruncatedStream` if no terminating byte is found, `Overflow` if the value
    /// does not fit `T`.
    pub fn read_unsigned_varint<T>(&mut self) -> DecodeResult<T>
    where
        T: PrimInt + Unsigned,
    {
        let (value, used) = leb128::decode_one::<T>(self.unread())?;
        self.position += used;
        Ok(value)
    }

    /// Reads a zigzag-mapped varint as an `i32`.
    pub fn read_signed_varint_i32(&mut self) -> DecodeResult<i32> {
        self.read_unsigned_varint::<u32>().map(zigzag::decode_i32)
    }

    /// Reads a varint count and checks that it fits in `usize`.
    pub fn read_count(&mut self) -> DecodeResult<usize> {
        let start = self.position;
        let raw = self.read_unsigned_varint::<u64>()?;
        usize::try_from(raw).map_err(|_| {
            self.position = start;
            DecodeError::Overflow(format!("count {} does not fit in usize", raw))
        })
    }
}

impl<'a> From<&'a [u8]> for ByteCursor<'a> {
    fn from(data: &'a [u8]) -> Self {
        Self::new(data)
    }
}
