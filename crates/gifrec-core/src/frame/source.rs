//! Pixel sources: the boundary between platform image handles and the encoder.

use std::borrow::Cow;

use image::{RgbImage, RgbaImage};

use super::RgbFrame;
use crate::Rgb;

/// Anything that can hand the encoder a packed-color raster of known size.
///
/// Pixels are row-major `0xAARRGGBB` values; alpha is ignored. Captured
/// widgets, canvases and decoded images all sit behind this trait so the
/// quantizer and container code never see a platform type.
pub trait PixelSource {
    /// Width and height in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Packed pixels, `width * height` entries.
    fn argb_pixels(&self) -> Cow<'_, [u32]>;
}

/// An owned packed-color frame, the shape most capture loops produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl PackedFrame {
    pub fn new(width: u32, height: u32, pixels: Vec<u32>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// A frame of a single color.
    pub fn filled(width: u32, height: u32, argb: u32) -> Self {
        let len = width as usize * height as usize;
        Self::new(width, height, vec![argb; len])
    }

    /// Build a frame by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> u32) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self::new(width, height, pixels)
    }
}

impl PixelSource for PackedFrame {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn argb_pixels(&self) -> Cow<'_, [u32]> {
        Cow::Borrowed(&self.pixels)
    }
}

impl PixelSource for RgbFrame {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn argb_pixels(&self) -> Cow<'_, [u32]> {
        Cow::Owned(
            self.pixels
                .chunks_exact(3)
                .map(|px| Rgb::new(px[0], px[1], px[2]).to_argb())
                .collect(),
        )
    }
}

impl PixelSource for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbaImage::dimensions(self)
    }

    fn argb_pixels(&self) -> Cow<'_, [u32]> {
        Cow::Owned(
            self.pixels()
                .map(|p| {
                    let [r, g, b, a] = p.0;
                    ((a as u32) << 24) | (Rgb::new(r, g, b).to_argb() & 0x00FF_FFFF)
                })
                .collect(),
        )
    }
}

impl PixelSource for RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbImage::dimensions(self)
    }

    fn argb_pixels(&self) -> Cow<'_, [u32]> {
        Cow::Owned(self.pixels().map(|p| Rgb::from(p.0).to_argb()).collect())
    }
}

impl<T: PixelSource + ?Sized> PixelSource for &T {
    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }

    fn argb_pixels(&self) -> Cow<'_, [u32]> {
        (**self).argb_pixels()
    }
}
