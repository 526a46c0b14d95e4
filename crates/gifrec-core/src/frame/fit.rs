//! Fitting frames whose size differs from the locked canvas size.

use image::imageops::{self, FilterType};
use image::RgbImage;
use serde::{Deserialize, Serialize};

use super::RgbFrame;

/// How a frame is brought to the canvas size when its dimensions differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameFit {
    /// Point-sampled (nearest neighbor) rescale to the canvas size.
    #[default]
    Scale,
    /// Copy 1:1 from the top-left corner, cropping overflow and leaving
    /// uncovered canvas black.
    Anchor,
}

/// Bring `frame` to `width` x `height`.
///
/// Frames that already match are returned untouched.
pub fn fit_to_canvas(frame: RgbFrame, width: u32, height: u32, fit: FrameFit) -> RgbFrame {
    if frame.width == width && frame.height == height {
        return frame;
    }

    match fit {
        FrameFit::Scale => scale_nearest(frame, width, height),
        FrameFit::Anchor => anchor_top_left(&frame, width, height),
    }
}

fn scale_nearest(frame: RgbFrame, width: u32, height: u32) -> RgbFrame {
    let (src_width, src_height) = (frame.width, frame.height);
    match RgbImage::from_raw(src_width, src_height, frame.pixels) {
        Some(img) => {
            let resized = imageops::resize(&img, width, height, FilterType::Nearest);
            RgbFrame::new(width, height, resized.into_raw())
        }
        // Buffer does not match its declared size; fall back to a plain copy
        None => anchor_top_left(&RgbFrame::new(src_width, src_height, Vec::new()), width, height),
    }
}

fn anchor_top_left(frame: &RgbFrame, width: u32, height: u32) -> RgbFrame {
    let mut out = vec![0u8; width as usize * height as usize * 3];

    let copy_w = width.min(frame.width) as usize * 3;
    let copy_h = height.min(frame.height) as usize;
    let src_stride = frame.width as usize * 3;
    let dst_stride = width as usize * 3;

    for y in 0..copy_h {
        let src = &frame.pixels[(y * src_stride).min(frame.pixels.len())..];
        let n = copy_w.min(src.len());
        out[y * dst_stride..y * dst_stride + n].copy_from_slice(&src[..n]);
    }

    RgbFrame::new(width, height, out)
}
