//! This file is the root of the `tsfile_decode` crate: the value-decoding layer
//! of a tsfile reader.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of the library.
//! 2.  Re-exporting the types a reader needs to decode a page's value block.
//!
//! A reader that already knows a block's (encoding, data type) pair either
//! drives a typed decoder from [`decoder`] value by value, or hands the whole
//! block to [`decode_block`].

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod block;
pub mod config;
pub mod decoder;
pub mod error;
pub mod kernels;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

//==================================================================================
// 2. Public Re-exports
//==================================================================================
pub use block::{decode_block, DecodedValues};
pub use config::DecodeConfig;
pub use decoder::{
    BooleanRleDecoder, Decoder, DeltaDecoder, FloatDecoder, IntRleDecoder, IntegerDecoder,
    PlainDecoder,
};
pub use error::{DecodeError, DecodeResult};
pub use kernels::ByteCursor;
pub use observability::init_logging;
pub use types::{TsDataType, TsEncoding};
