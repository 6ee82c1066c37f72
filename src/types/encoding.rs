//! This module defines the canonical representation of a block's on-disk encoding.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DecodeError;

/// The scheme a block was written with. Fixed per block by the writer and
/// never inferred by the reader.
///
/// The discriminants are the single-byte codes used by the container metadata.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TsEncoding {
    Plain = 0,
    PlainDictionary = 1,
    /// Hybrid run-length / bit-packed integers.
    Rle = 2,
    Diff = 3,
    /// Second-order delta integers (base value plus bounded deltas).
    #[serde(rename = "TS_2DIFF")]
    Ts2Diff = 4,
    Bitmap = 5,
    Gorilla = 6,
    Regular = 7,
}

impl TsEncoding {
    /// Returns the single-byte wire code of this encoding.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Returns `true` for the integer schemes a floating decoder may wrap.
    pub fn is_integer_based(self) -> bool {
        matches!(self, Self::Rle | Self::Ts2Diff)
    }
}

impl TryFrom<u8> for TsEncoding {
    type Error = DecodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Plain),
            1 => Ok(Self::PlainDictionary),
            2 => Ok(Self::Rle),
            3 => Ok(Self::Diff),
            4 => Ok(Self::Ts2Diff),
            5 => Ok(Self::Bitmap),
            6 => Ok(Self::Gorilla),
            7 => Ok(Self::Regular),
            other => Err(DecodeError::UnsupportedType(format!(
                "Unknown encoding code {}",
                other
            ))),
        }
    }
}

/// Provides the canonical string representation for a `TsEncoding`.
impl fmt::Display for TsEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // These names are part of the public contract and match the serde names.
        let name = match self {
            Self::Plain => "PLAIN",
            Self::PlainDictionary => "PLAIN_DICTIONARY",
            Self::Rle => "RLE",
            Self::Diff => "DIFF",
            Self::Ts2Diff => "TS_2DIFF",
            Self::Bitmap => "BITMAP",
            Self::Gorilla => "GORILLA",
            Self::Regular => "REGULAR",
        };
        f.write_str(name)
    }
}
