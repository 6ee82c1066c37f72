//! This module collects the pure, stateless building blocks that every decoder
//! is written on top of.
//!
//! Nothing in here knows about blocks, encodings or logical types: the kernels
//! read and write primitive values, and the `ByteCursor` tracks how far into a
//! block a decoder has read.

/// Forward-only reader over a byte block.
pub mod cursor;

/// Bit-Width Reduction primitives.
pub mod bitpack;
pub mod leb128;
pub mod zigzag;

pub use cursor::ByteCursor;
