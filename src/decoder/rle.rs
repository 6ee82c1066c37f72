//! Decoder for the hybrid run-length / bit-packed integer encoding (`RLE`).
//!
//! Block layout:
//!
//! ```text
//! [declared count: varint] [bit width: u8] group*
//! group := [header: varint] payload
//!   header & 1 == 0  run-length:  (header >> 1) repeats of one big-endian literal
//!   header & 1 == 1  bit-packed:  (header >> 1) * 8 entries, MSB-first, at `bit width`
//! ```
//!
//! The declared count, not the end of the buffer, decides when the block is
//! done. A final bit-packed group may carry up to 7 padding entries past the
//! declared count; those are dropped.

use crate::decoder::{assert_has_next, assert_not_initialized, Decoder};
use crate::error::{DecodeError, DecodeResult};
use crate::kernels::{bitpack, ByteCursor};
use crate::traits::IntegerValue;

/// The group currently being drained.
#[derive(Debug, Clone, Copy)]
enum Run<'a, T> {
    Idle,
    Repeated {
        value: T,
        left: usize,
    },
    Packed {
        payload: &'a [u8],
        next_index: usize,
        len: usize,
    },
}

impl<'a, T: IntegerValue> Run<'a, T> {
    /// Takes the next value of this group, or `None` once it is drained.
    fn take(&mut self, bit_width: u8) -> DecodeResult<Option<T>> {
        match self {
            Run::Idle => Ok(None),
            Run::Repeated { left: 0, .. } => Ok(None),
            Run::Repeated { value, left } => {
                *left -= 1;
                Ok(Some(*value))
            }
            Run::Packed {
                next_index, len, ..
            } if *next_index == *len => Ok(None),
            Run::Packed {
                payload,
                next_index,
                ..
            } => {
                let bits = bitpack::unpack_one(*payload, *next_index, bit_width)?;
                *next_index += 1;
                Ok(Some(T::from_packed(bits)))
            }
        }
    }
}

/// Decodes `i32`/`i64` values from an `RLE` block.
#[derive(Debug)]
pub struct IntRleDecoder<'a, T: IntegerValue> {
    cursor: ByteCursor<'a>,
    initialized: bool,
    bit_width: u8,
    /// Declared values not yet returned.
    remaining: usize,
    run: Run<'a, T>,
}

impl<'a, T: IntegerValue> Default for IntRleDecoder<'a, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: IntegerValue> IntRleDecoder<'a, T> {
    pub fn new() -> Self {
        Self {
            cursor: ByteCursor::new(&[]),
            initialized: false,
            bit_width: 0,
            remaining: 0,
            run: Run::Idle,
        }
    }

    /// The packing width read from the block header.
    pub fn bit_width(&self) -> u8 {
        self.bit_width
    }

    fn read_group(&mut self) -> DecodeResult<Run<'a, T>> {
        let header: u64 = self.cursor.read_unsigned_varint()?;
        let count = usize::try_from(header >> 1).map_err(|_| {
            DecodeError::Overflow(format!("group header {} does not fit in usize", header))
        })?;
        if count == 0 {
            return Err(DecodeError::MalformedStream(format!(
                "group header {} describes no values",
                header
            )));
        }

        if header & 1 == 0 {
            if count > self.remaining {
                return Err(DecodeError::MalformedStream(format!(
                    "run of {} values exceeds the {} values left in the block",
                    count, self.remaining
                )));
            }
            let value = T::read_fixed(&mut self.cursor)?;
            log::trace!("RLE run group: {} x {:?}", count, value);
            Ok(Run::Repeated { value, left: count })
        } else {
            // `count` is the number of 8-entry subgroups here.
            if count > self.remaining.div_ceil(8) {
                return Err(DecodeError::MalformedStream(format!(
                    "bit-packed group of {} entries exceeds the {} values left in the block",
                    count.saturating_mul(8),
                    self.remaining
                )));
            }
            let bit_width = self.bit_width;
            let overflow = || {
                DecodeError::Overflow(format!(
                    "bit-packed group of {} subgroups at {} bits overflows the addressable size",
                    count, bit_width
                ))
            };
            let entries = count.checked_mul(8).ok_or_else(overflow)?;
            let payload_len = bitpack::packed_len(entries, bit_width).ok_or_else(overflow)?;
            let payload = self.cursor.read_bytes(payload_len)?;
            let len = entries.min(self.remaining);
            log::trace!(
                "RLE bit-packed group: {} entries ({} used) at {} bits",
                entries,
                len,
                bit_width
            );
            Ok(Run::Packed {
                payload,
                next_index: 0,
                len,
            })
        }
    }
}

impl<'a, T: IntegerValue> Decoder<'a> for IntRleDecoder<'a, T> {
    type Value = T;

    fn init(&mut self, mut data: ByteCursor<'a>) -> DecodeResult<()> {
        assert_not_initialized(self.initialized, "IntRleDecoder");

        let count = data.read_count()?;
        let bit_width = data.read_u8()?;
        if bit_width > T::BITS {
            return Err(DecodeError::MalformedStream(format!(
                "bit width {} exceeds the {}-bit value type",
                bit_width,
                T::BITS
            )));
        }
        log::trace!("RLE block: {} values at bit width {}", count, bit_width);

        self.cursor = data;
        self.bit_width = bit_width;
        self.remaining = count;
        self.initialized = true;
        Ok(())
    }

    fn has_next(&self) -> bool {
        self.remaining > 0
    }

    /// # Panics
    /// If `has_next()` is `false`.
    fn next(&mut self) -> DecodeResult<T> {
        assert_has_next(self.has_next(), "IntRleDecoder");

        let value = match self.run.take(self.bit_width)? {
            Some(value) => value,
            None => {
                self.run = self.read_group()?;
                self.run.take(self.bit_width)?.ok_or_else(|| {
                    DecodeError::MalformedStream("group produced no values".to_string())
                })?
            }
        };
        self.remaining -= 1;
        Ok(value)
    }

    fn remaining_len(&self) -> Option<usize> {
        Some(self.remaining)
    }

    fn trailing_bytes(&self) -> usize {
        self.cursor.len_remaining()
    }
}

/// Decodes `bool` values from an `RLE` block written with 32-bit literals;
/// any non-zero entry is `true`.
#[derive(Debug, Default)]
pub struct BooleanRleDecoder<'a> {
    inner: IntRleDecoder<'a, i32>,
}

impl<'a> BooleanRleDecoder<'a> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'a> Decoder<'a> for BooleanRleDecoder<'a> {
    type Value = bool;

    fn init(&mut self, data: ByteCursor<'a>) -> DecodeResult<()> {
        self.inner.init(data)
    }

    fn has_next(&self) -> bool {
        self.inner.has_next()
    }

    /// # Panics
    /// If `has_next()` is `false`.
    fn next(&mut self) -> DecodeResult<bool> {
        assert_has_next(self.has_next(), "BooleanRleDecoder");
        Ok(self.inner.next()? != 0)
    }

    fn remaining_len(&self) -> Option<usize> {
        self.inner.remaining_len()
    }

    fn trailing_bytes(&self) -> usize {
        self.inner.trailing_bytes()
    }
}

//==================================================================================
// Unit Tests
//==================================================================================
