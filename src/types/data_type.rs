//! This module defines the canonical, type-safe representation of the logical
//! data types a block may hold.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DecodeError;
use crate::types::TsEncoding;

/// The logical type of every value in a block.
///
/// The type determines the element width and the legal set of encodings. The
/// discriminants are the single-byte codes used by the container metadata.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TsDataType {
    Boolean = 0,
    Int32 = 1,
    Int64 = 2,
    Float = 3,
    Double = 4,
    /// Variable-length bytes.
    Text = 5,
}

impl TsDataType {
    /// Returns the single-byte wire code of this type.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Width in bytes of one value, or `None` for variable-length types.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            Self::Boolean => Some(1),
            Self::Int32 | Self::Float => Some(4),
            Self::Int64 | Self::Double => Some(8),
            Self::Text => None,
        }
    }

    /// Returns `true` if the data type is a signed integer.
    pub fn is_integer(self) -> bool {
        matches!(self, Self::Int32 | Self::Int64)
    }

    /// Returns `true` if the data type is a floating-point number.
    pub fn is_float(self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }

    /// Returns `true` if a decoder exists for `encoding` over this type.
    pub fn supports(self, encoding: TsEncoding) -> bool {
        match self {
            Self::Boolean => matches!(encoding, TsEncoding::Plain | TsEncoding::Rle),
            Self::Int32 | Self::Int64 | Self::Float | Self::Double => matches!(
                encoding,
                TsEncoding::Plain | TsEncoding::Rle | TsEncoding::Ts2Diff
            ),
            Self::Text => encoding == TsEncoding::Plain,
        }
    }
}

impl TryFrom<u8> for TsDataType {
    type Error = DecodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Boolean),
            1 => Ok(Self::Int32),
            2 => Ok(Self::Int64),
            3 => Ok(Self::Float),
            4 => Ok(Self::Double),
            5 => Ok(Self::Text),
            other => Err(DecodeError::UnsupportedType(format!(
                "Unknown data type code {}",
                other
            ))),
        }
    }
}

/// Provides the canonical string representation for a `TsDataType`.
impl fmt::Display for TsDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "BOOLEAN",
            Self::Int32 => "INT32",
            Self::Int64 => "INT64",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Text => "TEXT",
        };
        f.write_str(name)
    }
}
