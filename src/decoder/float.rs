//! Decoder for floating-point values stored as scaled integers.
//!
//! The writer multiplies every value by `10^max_point_number`, rounds it, and
//! stores the result with an integer encoding (`RLE` or `TS_2DIFF`). The block
//! starts with `max_point_number` as a varint, followed by the base integer
//! block. `f32` values use an `i32` base and `f64` values an `i64` base.

use num_traits::AsPrimitive;

use crate::decoder::{assert_has_next, assert_not_initialized, Decoder, IntegerDecoder};
use crate::error::DecodeResult;
use crate::kernels::ByteCursor;
use crate::traits::FloatValue;
use crate::types::TsEncoding;

/// Returns the divisor for a block header value: exactly 1 for 0, else `10^n`.
pub fn scale_for(max_point_number: u32) -> f64 {
    if max_point_number == 0 {
        1.0
    } else {
        10f64.powf(f64::from(max_point_number))
    }
}

/// Decodes `f32`/`f64` values from a scaled-integer block.
#[derive(Debug)]
pub struct FloatDecoder<'a, F: FloatValue> {
    base: IntegerDecoder<'a, F::Base>,
    initialized: bool,
    max_point_number: u32,
    scale: f64,
}

impl<'a, F: FloatValue> FloatDecoder<'a, F> {
    /// Selects the base integer decoder for `encoding`.
    ///
    /// # Errors
    /// `UnsupportedEncoding` for anything other than `RLE` and `TS_2DIFF`.
    /// Nothing has been read at that point.
    pub fn new(encoding: TsEncoding) -> DecodeResult<Self> {
        Ok(Self {
            base: IntegerDecoder::for_logical_type(encoding, F::DATA_TYPE)?,
            initialized: false,
            max_point_number: 0,
            scale: 1.0,
        })
    }

    pub fn encoding(&self) -> TsEncoding {
        self.base.encoding()
    }

    pub fn max_point_number(&self) -> u32 {
        self.max_point_number
    }

    /// The divisor applied to every base integer; always `>= 1`.
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl<'a, F: FloatValue> Decoder<'a> for FloatDecoder<'a, F> {
    type Value = F;

    fn init(&mut self, mut data: ByteCursor<'a>) -> DecodeResult<()> {
        assert_not_initialized(self.initialized, "FloatDecoder");

        let max_point_number: u32 = data.read_unsigned_varint()?;
        self.max_point_number = max_point_number;
        self.scale = scale_for(max_point_number);
        log::trace!(
            "Float block over {}: max point number {}, scale {}",
            self.base.encoding(),
            max_point_number,
            self.scale
        );

        self.base.init(data.remaining())?;
        self.initialized = true;
        Ok(())
    }

    fn has_next(&self) -> bool {
        self.base.has_next()
    }

    /// Divides in `f64` before narrowing, also for `f32` output.
    ///
    /// # Panics
    /// If `has_next()` is `false`.
    fn next(&mut self) -> DecodeResult<F> {
        assert_has_next(self.has_next(), "FloatDecoder");
        let raw = self.base.next()?;
        let widened: f64 = raw.as_();
        Ok(F::from_scaled(widened / self.scale))
    }

    fn remaining_len(&self) -> Option<usize> {
        self.base.remaining_len()
    }

    fn trailing_bytes(&self) -> usize {
        self.base.trailing_bytes()
    }
}

//==================================================================================
// Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::test_utils::{delta_block, float_block, rle_block};
    use crate::types::TsDataType;

    fn decode_all<F: FloatValue>(encoding: TsEncoding, block: &[u8]) -> DecodeResult<Vec<F>> {
        let mut decoder = FloatDecoder::<F>::new(encoding)?;
        decoder.init(ByteCursor::new(block))?;
        decoder.values().collect()
    }

    #[test]
    fn test_two_decimal_places_over_rle() {
        let block = float_block(2, rle_block(&[150, -75], 32));
        let decoded = decode_all::<f32>(TsEncoding::Rle, &block).unwrap();
        assert_eq!(decoded, vec![1.5f32, -0.75f32]);
    }

    #[test]
    fn test_two_decimal_places_over_delta_double() {
        let block = float_block(2, delta_block(&[150, -75], 64));
        let decoded = decode_all::<f64>(TsEncoding::Ts2Diff, &block).unwrap();
        assert_eq!(decoded.len(), 2);
        assert!((decoded[0] - 1.50).abs() < 1e-12);
        assert!((decoded[1] + 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_zero_point_number_means_unit_scale() {
        let block = float_block(0, rle_block(&[42], 32));
        let mut decoder = FloatDecoder::<f32>::new(TsEncoding::Rle).unwrap();
        decoder.init(ByteCursor::new(&block)).unwrap();
        assert_eq!(decoder.scale(), 1.0);
        assert_eq!(decoder.next().unwrap(), 42.0);
        assert!(!decoder.has_next());
    }

    #[test]
    fn test_scale_is_never_below_one() {
        assert_eq!(scale_for(0), 1.0);
        assert_eq!(scale_for(1), 10.0);
        assert_eq!(scale_for(3), 1000.0);
        assert!(scale_for(400).is_infinite());
        for n in 0..40 {
            assert!(scale_for(n) >= 1.0);
        }
    }

    #[test]
    fn test_single_precision_divides_in_double_first() {
        // 16777217 is not representable as f32; dividing in f64 first and then
        // narrowing gives the correctly rounded quotient.
        let raw = 16_777_217i64;
        let block = float_block(1, delta_block(&[raw], 32));
        let decoded = decode_all::<f32>(TsEncoding::Ts2Diff, &block).unwrap();
        assert_eq!(decoded, vec![(raw as f64 / 10.0) as f32]);
    }

    #[test]
    fn test_unsupported_base_encoding_fails_at_construction() {
        for encoding in [
            TsEncoding::Plain,
            TsEncoding::Gorilla,
            TsEncoding::PlainDictionary,
            TsEncoding::Regular,
        ] {
            match FloatDecoder::<f32>::new(encoding) {
                Err(DecodeError::UnsupportedEncoding {
                    encoding: e,
                    data_type,
                }) => {
                    assert_eq!(e, encoding);
                    assert_eq!(data_type, TsDataType::Float);
                }
                other => panic!("Expected UnsupportedEncoding, got {:?}", other),
            }
        }
        assert!(matches!(
            FloatDecoder::<f64>::new(TsEncoding::Bitmap),
            Err(DecodeError::UnsupportedEncoding {
                data_type: TsDataType::Double,
                ..
            })
        ));
    }

    #[test]
    fn test_truncated_base_block_is_reported() {
        let mut block = float_block(2, delta_block(&[100, 250, 400], 64));
        block.pop();
        assert!(matches!(
            decode_all::<f64>(TsEncoding::Ts2Diff, &block),
            Err(DecodeError::TruncatedStream { .. })
        ));
    }

    #[test]
    fn test_missing_header_is_truncated() {
        let mut decoder = FloatDecoder::<f32>::new(TsEncoding::Rle).unwrap();
        assert!(matches!(
            decoder.init(ByteCursor::new(&[])),
            Err(DecodeError::TruncatedStream { .. })
        ));
        assert!(!decoder.has_next());
    }

    #[test]
    #[should_panic(expected = "FloatDecoder::next() called with no values left")]
    fn test_next_after_exhaustion_panics() {
        let block = float_block(1, rle_block(&[5], 32));
        let mut decoder = FloatDecoder::<f32>::new(TsEncoding::Rle).unwrap();
        decoder.init(ByteCursor::new(&block)).unwrap();
        assert_eq!(decoder.next().unwrap(), 0.5);
        let _ = decoder.next();
    }

    #[test]
    #[should_panic(expected = "FloatDecoder::next() called with no values left")]
    fn test_next_before_init_panics() {
        let mut decoder = FloatDecoder::<f64>::new(TsEncoding::Ts2Diff).unwrap();
        assert!(!decoder.has_next());
        let _ = decoder.next();
    }
}
