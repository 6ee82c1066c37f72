//! This module is the block-level entry point: given the (encoding, data type)
//! pair recorded in a page header and the page's value bytes, it picks the
//! matching decoder and drains it into a typed vector.
//!
//! The per-value decoders in [`crate::decoder`] are the streaming API; this is
//! the convenience layer for callers that want a whole block at once.

use crate::config::DecodeConfig;
use crate::decoder::{
    BooleanRleDecoder, Decoder, FloatDecoder, IntegerDecoder, PlainDecoder,
};
use crate::error::{DecodeError, DecodeResult};
use crate::kernels::ByteCursor;
use crate::types::{TsDataType, TsEncoding};

//==================================================================================
// 1. Decoded Output
//==================================================================================

/// The values of one block, typed by the block's logical data type.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValues<'a> {
    Boolean(Vec<bool>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    /// Borrowed from the input block.
    Text(Vec<&'a [u8]>),
}

impl DecodedValues<'_> {
    pub fn len(&self) -> usize {
        match self {
            Self::Boolean(v) => v.len(),
            Self::Int32(v) => v.len(),
            Self::Int64(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Double(v) => v.len(),
            Self::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn data_type(&self) -> TsDataType {
        match self {
            Self::Boolean(_) => TsDataType::Boolean,
            Self::Int32(_) => TsDataType::Int32,
            Self::Int64(_) => TsDataType::Int64,
            Self::Float(_) => TsDataType::Float,
            Self::Double(_) => TsDataType::Double,
            Self::Text(_) => TsDataType::Text,
        }
    }
}

//==================================================================================
// 2. Public API
//==================================================================================

/// Decodes every value of a block.
///
/// # Errors
/// * `UnsupportedEncoding` if `data_type` cannot be stored with `encoding`;
///   nothing is read in that case.
/// * `MalformedStream` if the block holds more than
///   `config.max_values_per_block` values, or carries trailing bytes while
///   `config.reject_trailing_bytes` is set.
/// * Any error of the underlying decoder.
pub fn decode_block<'a>(
    encoding: TsEncoding,
    data_type: TsDataType,
    data: &'a [u8],
    config: &DecodeConfig,
) -> DecodeResult<DecodedValues<'a>> {
    use TsDataType as T;
    use TsEncoding as E;

    let values = match (data_type, encoding) {
        (T::Boolean, E::Plain) => {
            DecodedValues::Boolean(drain(PlainDecoder::<bool>::new(), data, config)?)
        }
        (T::Boolean, E::Rle) => {
            DecodedValues::Boolean(drain(BooleanRleDecoder::new(), data, config)?)
        }
        (T::Int32, E::Plain) => {
            DecodedValues::Int32(drain(PlainDecoder::<i32>::new(), data, config)?)
        }
        (T::Int32, E::Rle | E::Ts2Diff) => DecodedValues::Int32(drain(
            IntegerDecoder::<i32>::new(encoding)?,
            data,
            config,
        )?),
        (T::Int64, E::Plain) => {
            DecodedValues::Int64(drain(PlainDecoder::<i64>::new(), data, config)?)
        }
        (T::Int64, E::Rle | E::Ts2Diff) => DecodedValues::Int64(drain(
            IntegerDecoder::<i64>::new(encoding)?,
            data,
            config,
        )?),
        (T::Float, E::Plain) => {
            DecodedValues::Float(drain(PlainDecoder::<f32>::new(), data, config)?)
        }
        (T::Float, E::Rle | E::Ts2Diff) => DecodedValues::Float(drain(
            FloatDecoder::<f32>::new(encoding)?,
            data,
            config,
        )?),
        (T::Double, E::Plain) => {
            DecodedValues::Double(drain(PlainDecoder::<f64>::new(), data, config)?)
        }
        (T::Double, E::Rle | E::Ts2Diff) => DecodedValues::Double(drain(
            FloatDecoder::<f64>::new(encoding)?,
            data,
            config,
        )?),
        (T::Text, E::Plain) => {
            DecodedValues::Text(drain(PlainDecoder::<&'a [u8]>::new(), data, config)?)
        }
        (
            T::Boolean,
            E::PlainDictionary | E::Diff | E::Ts2Diff | E::Bitmap | E::Gorilla | E::Regular,
        )
        | (
            T::Int32 | T::Int64 | T::Float | T::Double,
            E::PlainDictionary | E::Diff | E::Bitmap | E::Gorilla | E::Regular,
        )
        | (
            T::Text,
            E::PlainDictionary
            | E::Rle
            | E::Diff
            | E::Ts2Diff
            | E::Bitmap
            | E::Gorilla
            | E::Regular,
        ) => {
            return Err(DecodeError::UnsupportedEncoding {
                encoding,
                data_type,
            })
        }
    };

    log_metric!(
        "event" = "decode_block",
        "encoding" = &encoding,
        "data_type" = &data_type,
        "values" = values.len(),
        "bytes" = data.len()
    );
    Ok(values)
}

//==================================================================================
// 3. Internal Helpers
//==================================================================================

fn drain<'a, D: Decoder<'a>>(
    mut decoder: D,
    data: &'a [u8],
    config: &DecodeConfig,
) -> DecodeResult<Vec<D::Value>> {
    let limit = config.max_values_per_block;
    decoder.init(ByteCursor::new(data))?;

    let declared = decoder.remaining_len();
    if let Some(count) = declared {
        if count > limit {
            return Err(DecodeError::MalformedStream(format!(
                "block declares {} values, more than the limit of {}",
                count, limit
            )));
        }
    }

    let mut values = Vec::with_capacity(declared.unwrap_or(0));
    while decoder.has_next() {
        // Only reachable for blocks without a declared count.
        if values.len() == limit {
            return Err(DecodeError::MalformedStream(format!(
                "block holds more than the limit of {} values",
                limit
            )));
        }
        values.push(decoder.next()?);
    }

    let trailing = decoder.trailing_bytes();
    if trailing > 0 {
        if config.reject_trailing_bytes {
            return Err(DecodeError::MalformedStream(format!(
                "{} trailing bytes after the last value",
                trailing
            )));
        }
        log::debug!("Ignoring {} trailing bytes after the last value", trailing);
    }
    Ok(values)
}
