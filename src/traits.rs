//! This module defines the shared value traits that tie each Rust value type to
//! its logical data type and its on-disk representation.
//!
//! Every decoder is generic over one of these traits, so the value type of
//! `next()` is fixed at compile time and callers never inspect it at runtime.

use num_traits::{AsPrimitive, PrimInt, WrappingAdd};
use std::fmt::Debug;

use crate::error::DecodeResult;
use crate::kernels::ByteCursor;
use crate::types::TsDataType;

/// A signed integer that the RLE and TS_2DIFF decoders can produce.
pub trait IntegerValue: PrimInt + WrappingAdd + AsPrimitive<f64> + Debug + Send + 'static {
    /// The logical type this integer represents.
    const DATA_TYPE: TsDataType;
    /// Width in bits; also the widest legal bit-packing width for this type.
    const BITS: u8;

    /// Reads one big-endian value of this type's full width.
    fn read_fixed(cursor: &mut ByteCursor<'_>) -> DecodeResult<Self>;

    /// Reinterprets the low `BITS` bits of a packed entry as this type.
    fn from_packed(bits: u64) -> Self;
}

/// A floating-point value reconstructed from a scaled integer.
pub trait FloatValue: Copy + Debug + Send + 'static {
    /// The logical type this float represents.
    const DATA_TYPE: TsDataType;
    /// The integer type the writer stored the scaled values as.
    type Base: IntegerValue;

    /// Narrows an already-rescaled double to this precision.
    fn from_scaled(value: f64) -> Self;
}

// Implement the traits for the primitive types the format stores.
macro_rules! impl_integer_value {
    ($S:ty, $U:ty, $data_type:expr, $read:ident) => {
        impl IntegerValue for $S {
            const DATA_TYPE: TsDataType = $data_type;
            const BITS: u8 = <$S>::BITS as u8;

            fn read_fixed(cursor: &mut ByteCursor<'_>) -> DecodeResult<Self> {
                cursor.$read()
            }

            fn from_packed(bits: u64) -> Self {
                bits as $U as $S
            }
        }
    };
}

impl_integer_value!(i32, u32, TsDataType::Int32, read_i32_be);
impl_integer_value!(i64, u64, TsDataType::Int64, read_i64_be);

impl FloatValue for f32 {
    const DATA_TYPE: TsDataType = TsDataType::Float;
    type Base = i32;

    fn from_scaled(value: f64) -> Self {
        value as f32
    }
}

impl FloatValue for f64 {
    const DATA_TYPE: TsDataType = TsDataType::Double;
    type Base = i64;

    fn from_scaled(value: f64) -> Self {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_packed_reinterprets_sign_bit() {
        assert_eq!(i32::from_packed(0xFFFF_FFFF), -1);
        assert_eq!(i32::from_packed(0x1_0000_0005), 5);
        assert_eq!(i64::from_packed(u64::MAX), -1);
        assert_eq!(i64::from_packed(7), 7);
    }

    #[test]
    fn test_widths_match_data_types() {
        assert_eq!(<i32 as IntegerValue>::BITS, 32);
        assert_eq!(<i64 as IntegerValue>::BITS, 64);
        assert_eq!(<f32 as FloatValue>::DATA_TYPE, TsDataType::Float);
        assert_eq!(<f64 as FloatValue>::DATA_TYPE, TsDataType::Double);
    }
}
