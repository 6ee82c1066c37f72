//! This module defines the shared decoding contract and the stateful decoders
//! that implement it.
//!
//! Every decoder follows the same lifecycle: construct it (no data yet), `init`
//! it exactly once with the block, pull values with `has_next`/`next` in strict
//! forward order, then drop it. There is no reset and no reuse across blocks.
//!
//! The value type of `next()` is a generic parameter of each decoder, so a
//! caller that asked for `Int64` values gets `i64`s and never inspects a value's
//! type at runtime.

use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::error::{DecodeError, DecodeResult};
use crate::kernels::ByteCursor;
use crate::traits::IntegerValue;
use crate::types::{TsDataType, TsEncoding};

//==================================================================================
// 1. Module Declarations
//==================================================================================

pub mod delta;
pub mod float;
pub mod plain;
pub mod rle;

pub use delta::DeltaDecoder;
pub use float::FloatDecoder;
pub use plain::{PlainDecoder, PlainValue};
pub use rle::{BooleanRleDecoder, IntRleDecoder};

//==================================================================================
// 2. The Decoder Contract
//==================================================================================

/// The uniform iteration contract implemented by every decoder.
pub trait Decoder<'a> {
    type Value;

    /// Binds the decoder to a block, consuming any header bytes.
    ///
    /// # Panics
    /// If the decoder has already been initialised.
    fn init(&mut self, data: ByteCursor<'a>) -> DecodeResult<()>;

    /// `true` iff another value can be produced. Always `false` before `init`.
    fn has_next(&self) -> bool;

    /// Returns the next value in block order.
    ///
    /// # Panics
    /// If `has_next()` is `false`. Reading past the end is a caller bug, not a
    /// data condition, so no sentinel value is ever returned.
    fn next(&mut self) -> DecodeResult<Self::Value>;

    /// Values still to be produced, when the block declares a count.
    fn remaining_len(&self) -> Option<usize>;

    /// Bytes of the bound block that have not been consumed yet.
    fn trailing_bytes(&self) -> usize;

    /// Adapts the decoder into an iterator that stops after the first error.
    fn values(self) -> Values<'a, Self>
    where
        Self: Sized,
    {
        Values {
            decoder: self,
            failed: false,
            _block: PhantomData,
        }
    }
}

#[track_caller]
pub(crate) fn assert_has_next(has_next: bool, decoder: &str) {
    assert!(
        has_next,
        "{}::next() called with no values left; check has_next() first",
        decoder
    );
}

#[track_caller]
pub(crate) fn assert_not_initialized(initialized: bool, decoder: &str) {
    assert!(
        !initialized,
        "{}::init() called twice; decoders are single-use",
        decoder
    );
}

/// Iterator over a decoder's values. See [`Decoder::values`].
pub struct Values<'a, D> {
    decoder: D,
    failed: bool,
    _block: PhantomData<&'a [u8]>,
}

impl<'a, D: Decoder<'a>> Iterator for Values<'a, D> {
    type Item = DecodeResult<D::Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || !self.decoder.has_next() {
            return None;
        }
        let item = self.decoder.next();
        self.failed = item.is_err();
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        match self.decoder.remaining_len() {
            // A corrupt group can end the iteration early.
            Some(n) => (n.min(1), Some(n)),
            None => (0, None),
        }
    }
}

impl<'a, D: Decoder<'a>> FusedIterator for Values<'a, D> {}

//==================================================================================
// 3. Integer Base Decoders (closed set)
//==================================================================================

/// The integer encodings a block may use, as a closed sum type.
///
/// Floating decoders wrap one of these as their base.
#[derive(Debug)]
pub enum IntegerDecoder<'a, T: IntegerValue> {
    Rle(IntRleDecoder<'a, T>),
    Delta(DeltaDecoder<'a, T>),
}

impl<'a, T: IntegerValue> IntegerDecoder<'a, T> {
    /// Selects the decoder for `encoding` over `T`'s own logical type.
    pub fn new(encoding: TsEncoding) -> DecodeResult<Self> {
        Self::for_logical_type(encoding, T::DATA_TYPE)
    }

    /// Selects the decoder for `encoding`; `data_type` names the block's
    /// logical type in the error when the encoding is not integer-based
    /// (see [`TsEncoding::is_integer_based`]).
    pub(crate) fn for_logical_type(
        encoding: TsEncoding,
        data_type: TsDataType,
    ) -> DecodeResult<Self> {
        match encoding {
            TsEncoding::Rle => Ok(Self::Rle(IntRleDecoder::new())),
            TsEncoding::Ts2Diff => Ok(Self::Delta(DeltaDecoder::new())),
            TsEncoding::Plain
            | TsEncoding::PlainDictionary
            | TsEncoding::Diff
            | TsEncoding::Bitmap
            | TsEncoding::Gorilla
            | TsEncoding::Regular => Err(DecodeError::UnsupportedEncoding {
                encoding,
                data_type,
            }),
        }
    }

    pub fn encoding(&self) -> TsEncoding {
        match self {
            Self::Rle(_) => TsEncoding::Rle,
            Self::Delta(_) => TsEncoding::Ts2Diff,
        }
    }
}

impl<'a, T: IntegerValue> Decoder<'a> for IntegerDecoder<'a, T> {
    type Value = T;

    fn init(&mut self, data: ByteCursor<'a>) -> DecodeResult<()> {
        match self {
            Self::Rle(decoder) => decoder.init(data),
            Self::Delta(decoder) => decoder.init(data),
        }
    }

    fn has_next(&self) -> bool {
        match self {
            Self::Rle(decoder) => decoder.has_next(),
            Self::Delta(decoder) => decoder.has_next(),
        }
    }

    fn next(&mut self) -> DecodeResult<T> {
        match self {
            Self::Rle(decoder) => decoder.next(),
            Self::Delta(decoder) => decoder.next(),
        }
    }

    fn remaining_len(&self) -> Option<usize> {
        match self {
            Self::Rle(decoder) => decoder.remaining_len(),
            Self::Delta(decoder) => decoder.remaining_len(),
        }
    }

    fn trailing_bytes(&self) -> usize {
        match self {
            Self::Rle(decoder) => decoder.trailing_bytes(),
            Self::Delta(decoder) => decoder.trailing_bytes(),
        }
    }
}

//==================================================================================
// 4. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{delta_block, rle_block};

    #[test]
    fn test_integer_decoder_selects_by_encoding() {
        let rle = IntegerDecoder::<i32>::new(TsEncoding::Rle).unwrap();
        assert_eq!(rle.encoding(), TsEncoding::Rle);
        let delta = IntegerDecoder::<i64>::new(TsEncoding::Ts2Diff).unwrap();
        assert_eq!(delta.encoding(), TsEncoding::Ts2Diff);
    }

    #[test]
    fn test_integer_decoder_rejects_non_integer_encodings() {
        for encoding in [TsEncoding::Plain, TsEncoding::Gorilla, TsEncoding::Diff] {
            let result = IntegerDecoder::<i64>::new(encoding);
            match result {
                Err(DecodeError::UnsupportedEncoding {
                    encoding: e,
                    data_type,
                }) => {
                    assert_eq!(e, encoding);
                    assert_eq!(data_type, TsDataType::Int64);
                }
                other => panic!("Expected UnsupportedEncoding, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_selection_agrees_with_integer_based_encodings() {
        for code in 0u8..=7 {
            let encoding = TsEncoding::try_from(code).unwrap();
            let selected = IntegerDecoder::<i32>::for_logical_type(encoding, TsDataType::Float);
            assert_eq!(selected.is_ok(), encoding.is_integer_based(), "{}", encoding);
        }
    }

    #[test]
    fn test_values_iterator_drains_in_order() {
        let block = delta_block(&[10, 12, 14, 13], 64);
        let mut decoder = IntegerDecoder::<i64>::new(TsEncoding::Ts2Diff).unwrap();
        decoder.init(ByteCursor::new(&block)).unwrap();

        let values = decoder.values();
        assert_eq!(values.size_hint(), (1, Some(4)));
        let decoded: Vec<i64> = values.collect::<DecodeResult<_>>().unwrap();
        assert_eq!(decoded, vec![10, 12, 14, 13]);
    }

    #[test]
    fn test_values_iterator_stops_after_error() {
        let mut block = rle_block(&[1, 2, 3, 4, 5, 6, 7, 8, 9], 32);
        block.truncate(block.len() - 2);

        let mut decoder = IntegerDecoder::<i32>::new(TsEncoding::Rle).unwrap();
        decoder.init(ByteCursor::new(&block)).unwrap();
        let mut values = decoder.values();

        let mut seen_error = false;
        for item in values.by_ref() {
            if item.is_err() {
                seen_error = true;
            }
        }
        assert!(seen_error);
        assert!(values.next().is_none());
    }

    #[test]
    fn test_uninitialised_decoders_report_no_values() {
        let rle = IntegerDecoder::<i32>::new(TsEncoding::Rle).unwrap();
        let delta = IntegerDecoder::<i32>::new(TsEncoding::Ts2Diff).unwrap();
        assert!(!rle.has_next());
        assert!(!delta.has_next());
        assert_eq!(rle.remaining_len(), Some(0));
        assert_eq!(delta.values().count(), 0);
    }
}
