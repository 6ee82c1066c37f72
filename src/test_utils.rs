//! Reference writers used by the unit tests to build encoded blocks.
//!
//! These mirror what a tsfile writer emits closely enough to exercise every
//! decoder path; they make no attempt to pick the smallest encoding.

use crate::kernels::{bitpack, leb128};

/// Appends header fields and payloads to a block, one call per field.
#[derive(Debug, Default)]
pub struct BlockWriter {
    buf: Vec<u8>,
}

impl BlockWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn varint(mut self, value: u64) -> Self {
        leb128::encode_one(value, &mut self.buf);
        self
    }

    pub fn byte(mut self, value: u8) -> Self {
        self.buf.push(value);
        self
    }

    pub fn i32_be(mut self, value: i32) -> Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn i64_be(mut self, value: i64) -> Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn packed(mut self, values: &[u64], bit_width: u8) -> Self {
        bitpack::pack(values, bit_width, &mut self.buf).unwrap();
        self
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// The raw bits of `value` at the given type width.
fn to_bits(value: i64, type_bits: u32) -> u64 {
    match type_bits {
        32 => value as i32 as u32 as u64,
        64 => value as u64,
        other => panic!("unsupported type width {}", other),
    }
}

fn bits_needed(value: u64) -> u8 {
    (64 - value.leading_zeros()) as u8
}

fn literal(writer: BlockWriter, value: i64, type_bits: u32) -> BlockWriter {
    if type_bits == 32 {
        writer.i32_be(value as i32)
    } else {
        writer.i64_be(value)
    }
}

/// Encodes `values` as an `RLE` block for a `type_bits`-wide integer type.
///
/// Runs of 8 or more equal values become run-length groups; everything else
/// goes into bit-packed groups of 8, zero-padded at the end.
pub fn rle_block(values: &[i64], type_bits: u32) -> Vec<u8> {
    let bits: Vec<u64> = values.iter().map(|&v| to_bits(v, type_bits)).collect();
    let bit_width = bits.iter().map(|&b| bits_needed(b)).max().unwrap_or(0);

    let mut writer = BlockWriter::new().varint(values.len() as u64).byte(bit_width);
    let mut i = 0;
    while i < values.len() {
        let run = values[i..].iter().take_while(|&&v| v == values[i]).count();
        if run >= 8 {
            writer = literal(writer.varint((run as u64) << 1), values[i], type_bits);
            i += run;
        } else {
            let take = (values.len() - i).min(8);
            let mut group = bits[i..i + take].to_vec();
            group.resize(8, 0);
            writer = writer.varint((1 << 1) | 1).packed(&group, bit_width);
            i += take;
        }
    }
    writer.finish()
}

/// Encodes `values` as a `TS_2DIFF` block for a `type_bits`-wide integer type.
///
/// Steps wrap at the type width, the same way the decoder accumulates them.
pub fn delta_block(values: &[i64], type_bits: u32) -> Vec<u8> {
    let wrap = |v: i64| -> i64 {
        if type_bits == 32 {
            v as i32 as i64
        } else {
            v
        }
    };

    let deltas: Vec<i64> = values
        .windows(2)
        .map(|pair| wrap(pair[1].wrapping_sub(pair[0])))
        .collect();
    let min_delta = deltas.iter().copied().min().unwrap_or(0);
    let packed: Vec<u64> = deltas
        .iter()
        .map(|&d| to_bits(d.wrapping_sub(min_delta), type_bits))
        .collect();
    let bit_width = packed.iter().map(|&p| bits_needed(p)).max().unwrap_or(0);
    let first = values.first().copied().unwrap_or(0);

    let writer = BlockWriter::new().varint(values.len() as u64).byte(bit_width);
    let writer = literal(writer, min_delta, type_bits);
    let writer = literal(writer, first, type_bits);
    writer.packed(&packed, bit_width).finish()
}

/// Prefixes an integer block with a floating block's `max_point_number`.
pub fn float_block(max_point_number: u32, base_block: Vec<u8>) -> Vec<u8> {
    BlockWriter::new()
        .varint(u64::from(max_point_number))
        .bytes(&base_block)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rle_block_layout() {
        // 9 equal values form one run group: header 18, then a 4-byte literal.
        let block = rle_block(&[3; 9], 32);
        assert_eq!(block, vec![9, 2, 18, 0, 0, 0, 3]);
    }

    #[test]
    fn test_delta_block_layout() {
        let block = delta_block(&[10, 12, 14], 32);
        assert_eq!(block, vec![3, 0, 0, 0, 0, 2, 0, 0, 0, 10]);
    }
}
