//! Per-frame work that does not touch the output stream.
//!
//! Preparing a frame (fit, quantize, index, compress) depends only on the
//! frame and a snapshot of the session settings, so frames can be prepared
//! in any order, or concurrently, and written afterwards.

use super::EncodeError;
use crate::frame::{fit_to_canvas, FrameFit, PixelSource, RgbFrame};
use crate::lzw;
use crate::quantize::{self, Palette};
use crate::Rgb;

/// Settings a frame is prepared with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    /// Canvas width every frame is fitted to.
    pub width: u16,
    /// Canvas height every frame is fitted to.
    pub height: u16,
    pub quality: u32,
    pub fit: FrameFit,
    pub transparent: Option<Rgb>,
}

/// A quantized and compressed frame, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedFrame {
    pub width: u16,
    pub height: u16,
    pub palette: Palette,
    /// Palette entry standing in for the transparent color, if one is set.
    pub transparent_index: Option<u8>,
    /// Minimum code size byte, LZW sub-blocks and terminator.
    pub image_data: Vec<u8>,
}

/// Read a source's pixels once, rejecting frames with zero area, a pixel
/// buffer that does not match the declared size, or dimensions beyond 16
/// bits.
pub fn load_frame<S: PixelSource + ?Sized>(source: &S) -> Result<RgbFrame, EncodeError> {
    let (width, height) = source.dimensions();
    let argb = source.argb_pixels();
    let len = argb.len();
    if width == 0 || height == 0 || len != width as usize * height as usize {
        return Err(EncodeError::InvalidFrame { width, height, len });
    }
    if width > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err(EncodeError::TooLarge { width, height });
    }
    Ok(RgbFrame::from_argb(width, height, &argb))
}

/// Fit, quantize and compress one loaded frame.
pub fn prepare_frame(frame: RgbFrame, params: &FrameParams) -> PreparedFrame {
    let frame = fit_to_canvas(frame, params.width as u32, params.height as u32, params.fit);

    let (palette, indexed) = quantize::index_frame(&frame, params.quality);
    let transparent_index = params.transparent.map(|c| palette.closest_used(c));
    let image_data = lzw::encode_image_data(&indexed.indices, palette.depth());

    log::trace!(
        "prepared {}x{} frame: {} colors used, {} bytes of image data",
        params.width,
        params.height,
        palette.used_count(),
        image_data.len()
    );

    PreparedFrame {
        width: params.width,
        height: params.height,
        palette,
        transparent_index,
        image_data,
    }
}

/// Prepare a batch of loaded frames, concurrently when the `parallel`
/// feature is enabled. Results keep the input order.
pub fn prepare_frames(frames: Vec<RgbFrame>, params: &FrameParams) -> Vec<PreparedFrame> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        frames
            .into_par_iter()
            .map(|frame| prepare_frame(frame, params))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        frames
            .into_iter()
            .map(|frame| prepare_frame(frame, params))
            .collect()
    }
}
