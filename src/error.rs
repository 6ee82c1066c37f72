// In: src/error.rs

//! This module defines the single, unified error type for the decoding layer.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.
//!
//! Calling `next()` on an exhausted decoder is NOT represented here: that is a
//! caller bug and panics instead of returning a value.

use thiserror::Error;

use crate::types::{TsDataType, TsEncoding};

/// Alias for the result type of every fallible decoding operation.
pub type DecodeResult<T> = Result<T, DecodeError>;

#[derive(Error, Debug)]
pub enum DecodeError {
    // =========================================================================
    // === Dispatch Errors (raised before any byte is read)
    // =========================================================================
    #[error("Encoding {encoding} is not supported for data type {data_type}")]
    UnsupportedEncoding {
        encoding: TsEncoding,
        data_type: TsDataType,
    },

    #[error("Unsupported type code: {0}")]
    UnsupportedType(String),

    // =========================================================================
    // === Stream Errors (the block itself is corrupt or incomplete)
    // =========================================================================
    #[error("Truncated stream: needed {needed} bytes but only {available} remain")]
    TruncatedStream { needed: usize, available: usize },

    #[error("Malformed stream: {0}")]
    MalformedStream(String),

    #[error("Integer overflow during decoding: {0}")]
    Overflow(String),

    // =========================================================================
    // === External Error Wrappers
    // =========================================================================
    /// An error from the Serde JSON library, raised while parsing a `DecodeConfig`.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl DecodeError {
    /// Shorthand used by the cursor and kernels when a read runs off the end.
    pub(crate) fn truncated(needed: usize, available: usize) -> Self {
        DecodeError::TruncatedStream { needed, available }
    }
}
