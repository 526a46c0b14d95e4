//! Palettes and indexed frames produced by quantization.

use crate::Rgb;

/// Largest palette a GIF color table can hold.
pub const MAX_COLORS: usize = 256;

/// An ordered color table with a record of which entries pixels map to.
///
/// The used set only narrows the transparent-color search; unused entries are
/// still written to the color table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
    used: Vec<bool>,
}

impl Palette {
    /// Create a palette with every entry marked unused.
    ///
    /// Tables longer than 256 colors are truncated.
    pub fn new(mut colors: Vec<Rgb>) -> Self {
        colors.truncate(MAX_COLORS);
        let used = vec![false; colors.len()];
        Self { colors, used }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Color at `index`, black when out of range.
    pub fn color(&self, index: u8) -> Rgb {
        self.colors.get(index as usize).copied().unwrap_or(Rgb::BLACK)
    }

    pub fn is_used(&self, index: u8) -> bool {
        self.used.get(index as usize).copied().unwrap_or(false)
    }

    /// Number of entries at least one pixel maps to.
    pub fn used_count(&self) -> usize {
        self.used.iter().filter(|&&u| u).count()
    }

    pub(crate) fn mark_used(&mut self, index: u8) {
        if let Some(slot) = self.used.get_mut(index as usize) {
            *slot = true;
        }
    }

    /// The GIF color table size field: the table holds `2^(bits + 1)` entries.
    pub fn size_bits(&self) -> u8 {
        table_size_bits(self.colors.len())
    }

    /// Bit depth of indices into this palette, as needed by the LZW coder.
    pub fn depth(&self) -> u8 {
        self.size_bits() + 1
    }

    /// Serialize as a GIF color table, zero-padded to `3 * 2^(bits + 1)` bytes.
    pub fn to_table_bytes(&self) -> Vec<u8> {
        let entries = 2usize << self.size_bits();
        let mut table = Vec::with_capacity(entries * 3);
        for c in &self.colors {
            table.extend_from_slice(&[c.r, c.g, c.b]);
        }
        table.resize(entries * 3, 0);
        table
    }

    /// Index of the used entry closest to `target` (squared euclidean
    /// distance), or 0 when no entry is used.
    pub fn closest_used(&self, target: Rgb) -> u8 {
        self.colors
            .iter()
            .zip(&self.used)
            .enumerate()
            .filter(|(_, (_, &used))| used)
            .min_by_key(|(_, (c, _))| c.distance_sq(target))
            .map_or(0, |(i, _)| i as u8)
    }
}

/// Smallest `n` such that `2^(n + 1)` entries hold `len` colors (0..=7).
pub fn table_size_bits(len: usize) -> u8 {
    let mut bits = 0u8;
    while (2usize << bits) < len && bits < 7 {
        bits += 1;
    }
    bits
}

/// A frame of palette indices, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedFrame {
    pub width: u32,
    pub height: u32,
    pub indices: Vec<u8>,
}
