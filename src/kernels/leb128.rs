//! This module contains the pure, stateless kernels for LEB128 (Little-Endian
//! Base 128) variable-length unsigned integers.
//!
//! Each byte carries 7 data bits; a set high bit means "more bytes follow", and
//! the least-significant group comes first. Every block header count in the
//! format is written this way. Decoding works on a borrowed slice and reports how
//! many bytes it consumed, so the caller decides whether to commit the read.

use num_traits::{PrimInt, Unsigned};

use crate::error::{DecodeError, DecodeResult};

//==================================================================================
// 1. Public API for Single-Value Operations
//==================================================================================

/// Encodes a single unsigned integer into a LEB128 byte sequence, appending to `buffer`.
pub fn encode_one<T>(value: T, buffer: &mut Vec<u8>)
where
    T: Into<u64>,
{
    let mut current_value: u64 = value.into();
    loop {
        let mut byte = (current_value & 0x7F) as u8;
        current_value >>= 7;
        if current_value != 0 {
            byte |= 0x80;
        }
        buffer.push(byte);

        if current_value == 0 {
            break;
        }
    }
}

/// Decodes a single unsigned integer from the front of `bytes`.
///
/// Returns the value and the number of bytes it occupied. Nothing is consumed
/// on failure because the input is only borrowed.
///
/// # Errors
/// * `TruncatedStream` if the input ends before a byte with a clear high bit.
/// * `Overflow` if the encoded value does not fit in `T`.
pub fn decode_one<T>(bytes: &[u8]) -> DecodeResult<(T, usize)>
where
    T: PrimInt + Unsigned,
{
    let mut result = T::zero();
    let mut shift = 0usize;
    let total_bits = std::mem::size_of::<T>() * 8;

    for (index, &byte) in bytes.iter().enumerate() {
        // Check if adding these 7 bits would overflow the type's capacity.
        if shift >= total_bits {
            return Err(DecodeError::Overflow(format!(
                "varint longer than {} bits",
                total_bits
            )));
        }

        let seven_bit_payload = T::from(byte & 0x7F).ok_or_else(|| {
            DecodeError::Overflow("7-bit payload does not fit target type".to_string())
        })?;
        result = result | (seven_bit_payload << shift);

        if byte & 0x80 == 0 {
            // The last byte may still set bits past the type's width when the
            // width is not a multiple of 7.
            if shift + 7 > total_bits && (byte >> (total_bits - shift)) > 0 {
                return Err(DecodeError::Overflow(format!(
                    "varint exceeds {} bits",
                    total_bits
                )));
            }
            return Ok((result, index + 1));
        }

        shift += 7;
    }

    Err(DecodeError::truncated(bytes.len() + 1, bytes.len()))
}
