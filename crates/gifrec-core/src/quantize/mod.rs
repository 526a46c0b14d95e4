//! Color quantization for GIF frames.
//!
//! This module provides functionality for:
//! - Training a 256-color NeuQuant palette from RGB pixel data
//! - Mapping pixels to their nearest palette entry
//! - Tracking which palette entries a frame actually uses
//!
//! Quantization is a pure function of the pixels and the quality factor; no
//! state is shared between frames.

mod neuquant;
mod palette;

pub use neuquant::{NeuQuant, MAX_QUALITY, NET_SIZE};
pub use palette::{table_size_bits, IndexedFrame, Palette, MAX_COLORS};

use crate::frame::RgbFrame;
use crate::Rgb;

/// Default sampling stride, a good balance of speed and quality.
pub const DEFAULT_QUALITY: u32 = 10;

/// Quantize a frame and map every pixel to its palette index.
///
/// Returns the trained palette with the used entries marked, together with
/// the indexed pixels.
pub fn index_frame(frame: &RgbFrame, quality: u32) -> (Palette, IndexedFrame) {
    let nq = NeuQuant::train(&frame.pixels, quality);
    let mut palette = nq.palette();

    let indices: Vec<u8> = frame
        .pixels
        .chunks_exact(3)
        .map(|px| {
            let index = nq.index_of(Rgb::new(px[0], px[1], px[2]));
            palette.mark_used(index);
            index
        })
        .collect();

    let indexed = IndexedFrame {
        width: frame.width,
        height: frame.height,
        indices,
    };
    (palette, indexed)
}
