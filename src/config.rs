// In: src/config.rs

//! The configuration for block-level decoding.
//!
//! `DecodeConfig` is created once at the application boundary (for example
//! from a JSON document) and passed by reference to [`crate::block::decode_block`].
//! The individual decoders never see it; they only implement the format.

use serde::{Deserialize, Serialize};

use crate::error::DecodeResult;

//==================================================================================
// I. The DecodeConfig
//==================================================================================

/// Limits and strictness switches applied when a whole block is decoded.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct DecodeConfig {
    /// Upper bound on the number of values a single block may yield.
    ///
    /// A declared count above this is rejected before any value is decoded,
    /// so a corrupt header cannot trigger a huge allocation.
    #[serde(default = "default_max_values_per_block")]
    pub max_values_per_block: usize,

    /// If true, bytes left over after the last value make the block
    /// `MalformedStream`. Otherwise they are logged and ignored.
    #[serde(default)]
    pub reject_trailing_bytes: bool,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_values_per_block: default_max_values_per_block(),
            reject_trailing_bytes: false,
        }
    }
}

impl DecodeConfig {
    /// Parses a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> DecodeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Helper for `serde` to provide a default for `max_values_per_block`.
fn default_max_values_per_block() -> usize {
    16_777_216
}
