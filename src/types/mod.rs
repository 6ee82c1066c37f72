//! This module defines the core, strongly-typed descriptors that a caller hands
//! to the decoding layer out-of-band: which on-disk scheme a block was written
//! with, and which logical type its values have.
//!
//! Both enums replace the fragile integer/string tags of the container metadata
//! with safe, serializable types that can be matched exhaustively.

pub mod data_type;
pub mod encoding;

// Re-export the main types for easier access.
pub use data_type::TsDataType;
pub use encoding::TsEncoding;
