//! This module contains the pure, stateless kernels for Zig-zag mapping.
//!
//! Zig-zag is a lossless, bitwise mapping of signed integers to unsigned ones
//! (`0, -1, 1, -2, ...` -> `0, 1, 2, 3, ...`) so that small negative numbers
//! stay small when written as a varint. Plain `Int32` blocks use it.

macro_rules! impl_zigzag {
    ($encode:ident, $decode:ident, $S:ty, $U:ty) => {
        /// Encodes a single signed integer using the Zig-zag algorithm.
        pub fn $encode(n: $S) -> $U {
            // The right shift must be arithmetic.
            ((n << 1) ^ (n >> (<$S>::BITS - 1))) as $U
        }

        /// Decodes a single unsigned integer back to its signed representation.
        pub fn $decode(n: $U) -> $S {
            ((n >> 1) as $S) ^ -((n & 1) as $S)
        }
    };
}

impl_zigzag!(encode_i32, decode_i32, i32, u32);
impl_zigzag!(encode_i64, decode_i64, i64, u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zigzag_core_logic_i32() {
        assert_eq!(encode_i32(0), 0u32);
        assert_eq!(encode_i32(-1), 1u32);
        assert_eq!(encode_i32(1), 2u32);

        assert_eq!(decode_i32(0), 0);
        assert_eq!(decode_i32(1), -1);
        assert_eq!(decode_i32(2), 1);
        assert_eq!(decode_i32(9), -5);
    }

    #[test]
    fn test_max_min_values() {
        for value in [i32::MAX, i32::MIN, -1, 0, 1] {
            assert_eq!(decode_i32(encode_i32(value)), value);
        }
        for value in [i64::MAX, i64::MIN, -1, 0, 1] {
            assert_eq!(decode_i64(encode_i64(value)), value);
        }
    }
}
