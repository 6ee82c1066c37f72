//! Decoder for the second-order delta integer encoding (`TS_2DIFF`).
//!
//! Block layout:
//!
//! ```text
//! [declared count: varint] [delta bit width: u8] [min delta: BE] [first value: BE]
//! [count - 1 packed deltas, MSB-first, one continuous bit stream]
//! ```
//!
//! `value_i = value_{i-1} + min_delta + packed_i`, in wrapping arithmetic of the
//! value type. A width of 0 means every step is exactly `min_delta`.

use crate::decoder::{assert_has_next, assert_not_initialized, Decoder};
use crate::error::{DecodeError, DecodeResult};
use crate::kernels::{bitpack, ByteCursor};
use crate::traits::IntegerValue;

/// Decodes `i32`/`i64` values from a `TS_2DIFF` block.
///
/// The whole delta payload is reserved during `init`, so a short block fails
/// there instead of yielding a partial sequence.
#[derive(Debug)]
pub struct DeltaDecoder<'a, T: IntegerValue> {
    cursor: ByteCursor<'a>,
    initialized: bool,
    payload: &'a [u8],
    bit_width: u8,
    min_delta: T,
    previous: T,
    count: usize,
    emitted: usize,
}

impl<'a, T: IntegerValue> Default for DeltaDecoder<'a, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: IntegerValue> DeltaDecoder<'a, T> {
    pub fn new() -> Self {
        Self {
            cursor: ByteCursor::new(&[]),
            initialized: false,
            payload: &[],
            bit_width: 0,
            min_delta: T::zero(),
            previous: T::zero(),
            count: 0,
            emitted: 0,
        }
    }

    pub fn bit_width(&self) -> u8 {
        self.bit_width
    }

    pub fn min_delta(&self) -> T {
        self.min_delta
    }
}

impl<'a, T: IntegerValue> Decoder<'a> for DeltaDecoder<'a, T> {
    type Value = T;

    fn init(&mut self, mut data: ByteCursor<'a>) -> DecodeResult<()> {
        assert_not_initialized(self.initialized, "DeltaDecoder");

        let count = data.read_count()?;
        let bit_width = data.read_u8()?;
        if bit_width > T::BITS {
            return Err(DecodeError::MalformedStream(format!(
                "delta bit width {} exceeds the {}-bit value type",
                bit_width,
                T::BITS
            )));
        }
        let min_delta = T::read_fixed(&mut data)?;
        let first = T::read_fixed(&mut data)?;

        let payload_len = bitpack::packed_len(count.saturating_sub(1), bit_width)
            .ok_or_else(|| {
                DecodeError::Overflow(format!(
                    "{} deltas of {} bits overflow the addressable size",
                    count, bit_width
                ))
            })?;
        let payload = data.read_bytes(payload_len)?;
        log::trace!(
            "TS_2DIFF block: {} values, width {}, min delta {:?}, first {:?}",
            count,
            bit_width,
            min_delta,
            first
        );

        self.cursor = data;
        self.payload = payload;
        self.bit_width = bit_width;
        self.min_delta = min_delta;
        self.previous = first;
        self.count = count;
        self.initialized = true;
        Ok(())
    }

    fn has_next(&self) -> bool {
        self.emitted < self.count
    }

    /// # Panics
    /// If `has_next()` is `false`.
    fn next(&mut self) -> DecodeResult<T> {
        assert_has_next(self.has_next(), "DeltaDecoder");

        // The first value is stored verbatim and consumes no delta.
        if self.emitted > 0 {
            let packed = bitpack::unpack_one(self.payload, self.emitted - 1, self.bit_width)?;
            self.previous = self
                .previous
                .wrapping_add(&self.min_delta)
                .wrapping_add(&T::from_packed(packed));
        }
        self.emitted += 1;
        Ok(self.previous)
    }

    fn remaining_len(&self) -> Option<usize> {
        Some(self.count - self.emitted)
    }

    fn trailing_bytes(&self) -> usize {
        self.cursor.len_remaining()
    }
}

//==================================================================================
// Unit Tests
//==================================================================================
