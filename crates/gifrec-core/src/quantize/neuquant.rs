//! NeuQuant neural-net color quantization.
//!
//! A thin layer over [`color_quant::NeuQuant`] that speaks packed RGB bytes
//! and [`Rgb`] instead of RGBA slices, and hands the trained colors out as a
//! [`Palette`].

use super::Palette;
use crate::Rgb;

/// Number of colors in the trained network.
pub const NET_SIZE: usize = 256;

/// Largest sampling stride handed to the network; coarser values are
/// clamped. 30 samples one pixel in thirty.
pub const MAX_QUALITY: u32 = 30;

const OPAQUE: u8 = 0xFF;

/// A trained NeuQuant network.
pub struct NeuQuant {
    inner: color_quant::NeuQuant,
}

impl std::fmt::Debug for NeuQuant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NeuQuant").finish_non_exhaustive()
    }
}

impl NeuQuant {
    /// Train a network on packed RGB bytes.
    ///
    /// `quality` is the sampling stride: 1 looks at every pixel, 10 is a good
    /// speed/quality balance, larger values are faster and coarser. Values
    /// are clamped to `1..=MAX_QUALITY`. Trailing bytes that do not form a
    /// whole pixel are ignored; an empty buffer trains on a single black
    /// pixel.
    pub fn train(pixels: &[u8], quality: u32) -> Self {
        let mut rgba: Vec<u8> = pixels
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], OPAQUE])
            .collect();
        if rgba.is_empty() {
            rgba.extend_from_slice(&[0, 0, 0, OPAQUE]);
        }

        let sample_factor = quality.clamp(1, MAX_QUALITY) as i32;
        Self {
            inner: color_quant::NeuQuant::new(sample_factor, NET_SIZE, &rgba),
        }
    }

    /// The trained colors, indexed the way [`NeuQuant::index_of`] reports them.
    ///
    /// Every entry starts out unused; callers mark entries as they map pixels.
    pub fn palette(&self) -> Palette {
        let colors = self
            .inner
            .color_map_rgb()
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();
        Palette::new(colors)
    }

    /// Index of the palette color closest to `color`.
    pub fn index_of(&self, color: Rgb) -> u8 {
        // the network has NET_SIZE entries, so every index fits in a byte
        self.inner.index_of(&[color.r, color.g, color.b, OPAQUE]) as u8
    }
}
