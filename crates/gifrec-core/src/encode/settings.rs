//! Serializable encoder configuration.

use serde::{Deserialize, Serialize};

use crate::frame::FrameFit;
use crate::Rgb;

/// A bundle of encoder settings, typically deserialized from a JSON or JS
/// object. Absent fields leave the encoder's current value in place.
///
/// Values go through the same setters as individual calls, so invalid
/// values are ignored the same way. `frameRate` is applied after `delayMs`
/// and wins when both are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EncoderSettings {
    /// Delay between frames in milliseconds.
    pub delay_ms: Option<u32>,
    /// Frames per second, converted to a delay.
    pub frame_rate: Option<f32>,
    /// Quantizer sampling stride, 1 is best.
    pub quality: Option<i32>,
    /// Loop count, 0 loops forever.
    pub repeat: Option<i32>,
    /// Disposal method override.
    pub dispose: Option<i32>,
    pub transparent: Option<Rgb>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub x: Option<u16>,
    pub y: Option<u16>,
    pub fit: Option<FrameFit>,
}
