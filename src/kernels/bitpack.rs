//! This module contains the pure, stateless kernels for fixed-width bit-packing
//! and unpacking.
//!
//! Entries are packed most-significant-bit first: the first entry occupies the
//! high bits of the first byte, and an entry may straddle byte boundaries. Both
//! the RLE bit-packed groups and the TS_2DIFF delta stream use this layout.
//! Unpacking addresses a single entry by index, so a decoder never has to
//! materialize a whole group.

use bitvec::prelude::*;

use crate::error::{DecodeError, DecodeResult};

/// Largest supported entry width; entries are accumulated in a `u64`.
pub const MAX_BIT_WIDTH: u8 = 64;

//==================================================================================
// 1. Sizing
//==================================================================================

/// Number of bytes needed to hold `num_values` entries of `bit_width` bits.
///
/// Returns `None` if the bit count overflows `usize`.
pub fn packed_len(num_values: usize, bit_width: u8) -> Option<usize> {
    let bits = num_values.checked_mul(bit_width as usize)?;
    Some(bits.div_ceil(8))
}

//==================================================================================
// 2. Public API
//==================================================================================

/// Reads the entry at `index` from an MSB-first packed buffer.
///
/// # Errors
/// `TruncatedStream` if the entry extends past the end of `bytes`.
pub fn unpack_one(bytes: &[u8], index: usize, bit_width: u8) -> DecodeResult<u64> {
    debug_assert!(bit_width <= MAX_BIT_WIDTH);
    if bit_width == 0 {
        return Ok(0);
    }

    let width = bit_width as usize;
    let start = index * width;
    let bits = bytes.view_bits::<Msb0>();
    let chunk = bits.get(start..start + width).ok_or_else(|| {
        DecodeError::truncated((start + width).div_ceil(8), bytes.len())
    })?;

    Ok(chunk
        .iter()
        .by_vals()
        .fold(0u64, |acc, bit| (acc << 1) | u64::from(bit)))
}

/// Packs `values` MSB-first at `bit_width` bits each, appending to `output_buf`.
///
/// The final byte is zero-padded.
///
/// # Errors
/// `Overflow` if a value needs more than `bit_width` bits.
pub fn pack(values: &[u64], bit_width: u8, output_buf: &mut Vec<u8>) -> DecodeResult<()> {
    if bit_width > MAX_BIT_WIDTH {
        return Err(DecodeError::Overflow(format!(
            "bit width {} exceeds {}",
            bit_width, MAX_BIT_WIDTH
        )));
    }

    let width = bit_width as usize;
    let mut bit_vec = BitVec::<u8, Msb0>::with_capacity(values.len() * width);
    for &value in values {
        if width < 64 && value >> width != 0 {
            return Err(DecodeError::Overflow(format!(
                "value {} exceeds bit width {}",
                value, bit_width
            )));
        }
        bit_vec.extend_from_bitslice(&value.view_bits::<Msb0>()[64 - width..]);
    }

    output_buf.extend_from_slice(bit_vec.as_raw_slice());
    Ok(())
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
