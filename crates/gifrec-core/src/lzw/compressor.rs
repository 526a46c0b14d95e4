//! GIF-flavored variable-width LZW compression.

use std::collections::HashMap;

use super::BitWriter;

/// Codes never exceed 12 bits.
pub const MAX_CODE_SIZE: u8 = 12;

/// Dictionary capacity, including the clear and end codes.
pub const MAX_CODES: u16 = 1 << MAX_CODE_SIZE;

/// Minimum code size for indices of the given bit depth.
///
/// GIF requires at least 2 even for 1-bit images.
pub fn min_code_size(depth: u8) -> u8 {
    depth.clamp(2, 8)
}

/// Compress `indices` into a packed LZW code stream.
///
/// The stream starts with a clear code and ends with the end code. Code width
/// starts at `min_code_size + 1` and grows as the dictionary fills; once all
/// 4096 codes are taken a clear code is emitted and the dictionary restarts.
/// Indices must be below `1 << min_code_size`; higher bits are masked off.
pub fn compress(indices: &[u8], min_code_size: u8) -> Vec<u8> {
    let min_code_size = min_code_size.clamp(2, 8);
    let clear_code: u16 = 1 << min_code_size;
    let end_code = clear_code + 1;
    let mask = (clear_code - 1) as u8;

    let mut out = BitWriter::with_capacity(indices.len() / 2 + 4);
    let mut dict: HashMap<(u16, u8), u16> = HashMap::with_capacity(MAX_CODES as usize);
    let mut next_code = clear_code + 2;
    let mut width = min_code_size + 1;

    out.write(clear_code, width);

    let mut pixels = indices.iter().map(|&i| i & mask);
    let Some(first) = pixels.next() else {
        out.write(end_code, width);
        return out.finish();
    };

    let mut prefix = first as u16;
    for k in pixels {
        if let Some(&code) = dict.get(&(prefix, k)) {
            prefix = code;
            continue;
        }

        out.write(prefix, width);
        if next_code < MAX_CODES {
            dict.insert((prefix, k), next_code);
            next_code += 1;
            if next_code > (1 << width) && width < MAX_CODE_SIZE {
                width += 1;
            }
        } else {
            out.write(clear_code, width);
            dict.clear();
            next_code = clear_code + 2;
            width = min_code_size + 1;
        }
        prefix = k as u16;
    }

    out.write(prefix, width);
    // The decoder adds an entry for the last code it reads and widens if
    // that fills the current width; the end code must follow suit.
    if next_code == (1 << width) && width < MAX_CODE_SIZE {
        width += 1;
    }
    out.write(end_code, width);

    out.finish()
}
