//! LZW compression of indexed pixels for GIF image data.
//!
//! This module provides functionality for:
//! - Compressing palette indices into the variable-width LZW code stream
//! - Framing the code stream into length-prefixed sub-blocks
//!
//! The output of [`encode_image_data`] is the complete table-based image data
//! block: the minimum code size byte, sub-blocks of at most 255 bytes and
//! the zero-length terminator.

mod bit_writer;
mod compressor;

pub use bit_writer::BitWriter;
pub use compressor::{compress, min_code_size, MAX_CODES, MAX_CODE_SIZE};

/// Largest payload of a single data sub-block.
pub const MAX_SUB_BLOCK: usize = 255;

/// Compress `indices` for a palette of `depth` bits and frame the result.
pub fn encode_image_data(indices: &[u8], depth: u8) -> Vec<u8> {
    let code_size = min_code_size(depth);
    let data = compress(indices, code_size);

    let mut out = Vec::with_capacity(data.len() + data.len() / MAX_SUB_BLOCK + 3);
    out.push(code_size);
    write_sub_blocks(&data, &mut out);
    out
}

/// Append `data` as length-prefixed sub-blocks followed by a zero-length
/// block terminator.
pub fn write_sub_blocks(data: &[u8], out: &mut Vec<u8>) {
    for chunk in data.chunks(MAX_SUB_BLOCK) {
        out.push(chunk.len() as u8);
        out.extend_from_slice(chunk);
    }
    out.push(0);
}
