//! Frames as the encoder consumes them.
//!
//! Capture code hands frames over through [`PixelSource`]; the encoder turns
//! them into [`RgbFrame`]s of the canvas size before quantizing.

mod fit;
mod source;

pub use fit::{fit_to_canvas, FrameFit};
pub use source::{PackedFrame, PixelSource};

use crate::Rgb;

/// A 24-bit RGB frame, 3 bytes per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RgbFrame {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// A frame of a single color.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        let len = width as usize * height as usize;
        let pixels = [color.r, color.g, color.b].repeat(len);
        Self::new(width, height, pixels)
    }

    /// Unpack a source's pixels, dropping alpha.
    pub fn from_source<S: PixelSource + ?Sized>(source: &S) -> Self {
        let (width, height) = source.dimensions();
        Self::from_argb(width, height, &source.argb_pixels())
    }

    /// Unpack `0xAARRGGBB` pixels, dropping alpha.
    pub fn from_argb(width: u32, height: u32, argb: &[u32]) -> Self {
        let mut pixels = Vec::with_capacity(argb.len() * 3);
        for &p in argb {
            let c = Rgb::from_argb(p);
            pixels.extend_from_slice(&[c.r, c.g, c.b]);
        }
        Self::new(width, height, pixels)
    }

    /// Number of pixels the dimensions describe.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
