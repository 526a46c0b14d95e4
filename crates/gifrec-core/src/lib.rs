//! gifrec Core - Animated GIF encoding library
//!
//! This crate turns a sequence of raster frames into a single GIF89a stream.
//! Each frame is quantized to a 256-color palette with the NeuQuant neural
//! network, mapped to palette indices and LZW-compressed into the container.
//!
//! # Module Structure
//!
//! - `quantize` - NeuQuant palette training and nearest-color lookup
//! - `lzw` - GIF-flavored LZW compression and sub-block framing
//! - `frame` - Frame sources and fitting frames to the canvas
//! - `encode` - The GIF container encoder and its settings
//!
//! # Example
//!
//! ```ignore
//! use gifrec_core::encode::GifEncoder;
//! use gifrec_core::frame::PackedFrame;
//!
//! let mut encoder = GifEncoder::new(Vec::new());
//! encoder.set_repeat(0);
//! encoder.set_delay(100);
//! encoder.start()?;
//! encoder.add_frame(&PackedFrame::filled(4, 4, 0xFFFF0000))?;
//! encoder.finish()?;
//! let bytes = encoder.into_inner();
//! ```

pub mod encode;
pub mod frame;
pub mod lzw;
pub mod quantize;

#[cfg(test)]
pub(crate) mod test_support;

pub use encode::{EncodeError, EncoderSettings, FrameFit, GifEncoder, SettingOutcome};
pub use frame::{PackedFrame, PixelSource, RgbFrame};
pub use quantize::{IndexedFrame, Palette};

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Extract the color channels of a packed `0xAARRGGBB` value, dropping alpha.
    #[inline]
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Pack into an opaque `0xFFRRGGBB` value.
    #[inline]
    pub const fn to_argb(self) -> u32 {
        0xFF00_0000 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Squared euclidean distance between two colors.
    #[inline]
    pub fn distance_sq(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}
