//! GIF encoder WASM bindings.
//!
//! `JsGifEncoder` wraps an in-memory encoding session. Frames come in as the
//! RGBA bytes of a canvas `ImageData`; `finish` hands back the whole GIF.
//!
//! # Example
//!
//! ```typescript
//! const encoder = new JsGifEncoder({ repeat: 0, delayMs: 100 });
//! encoder.start();
//! for (const frame of frames) {
//!   encoder.addFrame(frame.data, frame.width, frame.height);
//! }
//! const bytes = encoder.finish();
//! const blob = new Blob([bytes], { type: 'image/gif' });
//! ```

use gifrec_core::encode::{EncodeError, EncoderSettings, FrameFit, GifEncoder, SessionState};
use gifrec_core::{PackedFrame, Rgb};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_js_error(e: EncodeError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Convert RGBA bytes into a packed frame, dropping alpha.
fn rgba_to_frame(rgba: &[u8], width: u32, height: u32) -> Result<PackedFrame, EncodeError> {
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(EncodeError::InvalidFrame {
            width,
            height,
            len: rgba.len() / 4,
        });
    }
    let pixels = rgba
        .chunks_exact(4)
        .map(|px| Rgb::new(px[0], px[1], px[2]).to_argb())
        .collect();
    Ok(PackedFrame::new(width, height, pixels))
}

/// Snapshot of the session, serialized for JavaScript.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EncoderInfo {
    started: bool,
    failed: bool,
    frame_count: usize,
    width: Option<u16>,
    height: Option<u16>,
    delay_centis: u16,
    byte_length: usize,
}

/// An animated GIF encoding session for JavaScript.
///
/// Configuration setters return `true` when the value was applied and
/// `false` when it was out of range and ignored.
#[wasm_bindgen]
pub struct JsGifEncoder {
    inner: GifEncoder<Vec<u8>>,
}

#[wasm_bindgen]
impl JsGifEncoder {
    /// Create an encoder, optionally configured from a settings object such
    /// as `{ repeat: 0, frameRate: 15, transparent: { r: 0, g: 0, b: 0 } }`.
    #[wasm_bindgen(constructor)]
    pub fn new(settings: JsValue) -> Result<JsGifEncoder, JsValue> {
        if settings.is_undefined() || settings.is_null() {
            return Ok(Self::from_settings(&EncoderSettings::default()));
        }
        let settings: EncoderSettings =
            serde_wasm_bindgen::from_value(settings).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_settings(&settings))
    }

    /// Apply a settings object to the running encoder.
    #[wasm_bindgen(js_name = applySettings)]
    pub fn apply_settings(&mut self, settings: JsValue) -> Result<(), JsValue> {
        let settings: EncoderSettings =
            serde_wasm_bindgen::from_value(settings).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inner.apply_settings(&settings);
        Ok(())
    }

    /// Begin a new GIF stream.
    pub fn start(&mut self) -> Result<(), JsValue> {
        self.inner.start().map_err(to_js_error)
    }

    /// Add a frame from RGBA bytes (`width * height * 4`).
    #[wasm_bindgen(js_name = addFrame)]
    pub fn add_frame(&mut self, rgba: &[u8], width: u32, height: u32) -> Result<(), JsValue> {
        self.add_rgba(rgba, width, height).map_err(to_js_error)
    }

    /// Add a frame straight from `ImageData.data`.
    #[wasm_bindgen(js_name = addImageData)]
    pub fn add_image_data(
        &mut self,
        data: &js_sys::Uint8ClampedArray,
        width: u32,
        height: u32,
    ) -> Result<(), JsValue> {
        self.add_rgba(&data.to_vec(), width, height).map_err(to_js_error)
    }

    /// End the stream and return the GIF bytes.
    ///
    /// The encoder's buffer is emptied, so it can start another stream.
    pub fn finish(&mut self) -> Result<Vec<u8>, JsValue> {
        self.finish_bytes().map_err(to_js_error)
    }

    /// Delay between frames in milliseconds.
    #[wasm_bindgen(js_name = setDelay)]
    pub fn set_delay(&mut self, ms: u32) -> bool {
        self.inner.set_delay(ms).is_applied()
    }

    #[wasm_bindgen(js_name = setFrameRate)]
    pub fn set_frame_rate(&mut self, fps: f32) -> bool {
        self.inner.set_frame_rate(fps).is_applied()
    }

    /// Sampling stride of the quantizer (1 = best, 10 = default).
    #[wasm_bindgen(js_name = setQuality)]
    pub fn set_quality(&mut self, quality: i32) -> bool {
        self.inner.set_quality(quality).is_applied()
    }

    #[wasm_bindgen(js_name = setSize)]
    pub fn set_size(&mut self, width: i32, height: i32) -> bool {
        self.inner.set_size(width, height).is_applied()
    }

    #[wasm_bindgen(js_name = setPosition)]
    pub fn set_position(&mut self, x: u16, y: u16) -> bool {
        self.inner.set_position(x, y).is_applied()
    }

    /// 0 loops forever; negative values are ignored.
    #[wasm_bindgen(js_name = setRepeat)]
    pub fn set_repeat(&mut self, repeat: i32) -> bool {
        self.inner.set_repeat(repeat).is_applied()
    }

    #[wasm_bindgen(js_name = setDispose)]
    pub fn set_dispose(&mut self, code: i32) -> bool {
        self.inner.set_dispose(code).is_applied()
    }

    #[wasm_bindgen(js_name = setTransparent)]
    pub fn set_transparent(&mut self, r: u8, g: u8, b: u8) -> bool {
        self.inner.set_transparent(Some(Rgb::new(r, g, b))).is_applied()
    }

    #[wasm_bindgen(js_name = clearTransparent)]
    pub fn clear_transparent(&mut self) -> bool {
        self.inner.set_transparent(None).is_applied()
    }

    /// `"scale"` or `"anchor"`.
    #[wasm_bindgen(js_name = setFit)]
    pub fn set_fit(&mut self, fit: &str) -> bool {
        let fit = match fit {
            "scale" => FrameFit::Scale,
            "anchor" => FrameFit::Anchor,
            other => {
                log::debug!("ignoring unknown fit mode {:?}", other);
                return false;
            }
        };
        self.inner.set_fit(fit).is_applied()
    }

    #[wasm_bindgen(getter, js_name = frameCount)]
    pub fn frame_count(&self) -> usize {
        self.inner.frame_count()
    }

    #[wasm_bindgen(getter, js_name = isStarted)]
    pub fn is_started(&self) -> bool {
        self.inner.is_started()
    }

    /// Bytes buffered for the current stream.
    #[wasm_bindgen(getter, js_name = byteLength)]
    pub fn byte_length(&self) -> usize {
        self.inner.get_ref().len()
    }

    /// Session snapshot as a plain object.
    pub fn info(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsGifEncoder {
    pub(crate) fn from_settings(settings: &EncoderSettings) -> Self {
        Self {
            inner: GifEncoder::with_settings(Vec::new(), settings),
        }
    }

    fn add_rgba(&mut self, rgba: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
        let frame = rgba_to_frame(rgba, width, height)?;
        self.inner.add_frame(&frame)
    }

    fn finish_bytes(&mut self) -> Result<Vec<u8>, EncodeError> {
        self.inner.finish()?;
        Ok(std::mem::take(self.inner.get_mut()))
    }

    fn snapshot(&self) -> EncoderInfo {
        let size = self.inner.size();
        EncoderInfo {
            started: self.inner.is_started(),
            failed: self.inner.state() == SessionState::Failed,
            frame_count: self.inner.frame_count(),
            width: size.map(|(w, _)| w),
            height: size.map(|(_, h)| h),
            delay_centis: self.inner.delay(),
            byte_length: self.inner.get_ref().len(),
        }
    }
}


/// WASM-specific tests that require JsValue.
///
/// These tests exercise the constructor and settings objects, which take a
/// `JsValue` and can only run on wasm32 targets. Use `wasm-pack test` to run
/// these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use serde::Serialize;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct TestSettings {
        repeat: i32,
        frame_rate: f32,
    }

    #[wasm_bindgen_test]
    fn test_constructor_without_settings() {
        let encoder = JsGifEncoder::new(JsValue::UNDEFINED).unwrap();
        assert!(!encoder.is_started());
    }

    #[wasm_bindgen_test]
    fn test_constructor_with_settings() {
        let settings = serde_wasm_bindgen::to_value(&TestSettings {
            repeat: 0,
            frame_rate: 25.0,
        })
        .unwrap();
        let encoder = JsGifEncoder::new(settings).unwrap();
        assert_eq!(encoder.inner.repeat(), Some(0));
        assert_eq!(encoder.inner.delay(), 4);
    }

    #[wasm_bindgen_test]
    fn test_invalid_settings_object() {
        let settings = serde_wasm_bindgen::to_value(&"fast").unwrap();
        assert!(JsGifEncoder::new(settings).is_err());
    }

    #[wasm_bindgen_test]
    fn test_add_frame_before_start_errors() {
        let mut encoder = JsGifEncoder::new(JsValue::NULL).unwrap();
        let err = encoder.add_frame(&[0; 16], 2, 2).unwrap_err();
        assert!(err.as_string().unwrap().contains("not been started"));
    }

    #[wasm_bindgen_test]
    fn test_image_data_frame() {
        let mut encoder = JsGifEncoder::new(JsValue::NULL).unwrap();
        let data = js_sys::Uint8ClampedArray::new_with_length(3 * 2 * 4);
        data.fill(200, 0, 24);
        encoder.start().unwrap();
        encoder.add_image_data(&data, 3, 2).unwrap();
        let bytes = encoder.finish().unwrap();
        assert_eq!(*bytes.last().unwrap(), 0x3B);
    }

    #[wasm_bindgen_test]
    fn test_info_object() {
        let encoder = JsGifEncoder::new(JsValue::UNDEFINED).unwrap();
        let info = encoder.info().unwrap();
        assert!(info.is_object());
    }
}
