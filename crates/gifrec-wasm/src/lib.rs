//! gifrec WASM - WebAssembly bindings for gifrec
//!
//! This crate exposes the gifrec-core encoder to JavaScript/TypeScript so a
//! page can record canvas frames into an animated GIF.
//!
//! # Module Structure
//!
//! - `encoder` - The `JsGifEncoder` session wrapper
//! - `logging` - Routes `log` records to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsGifEncoder } from '@gifrec/wasm';
//!
//! await init();
//!
//! const encoder = new JsGifEncoder({ repeat: 0, frameRate: 10 });
//! encoder.start();
//! const frame = ctx.getImageData(0, 0, canvas.width, canvas.height);
//! encoder.addImageData(frame.data, frame.width, frame.height);
//! const gif = encoder.finish();
//! ```

use wasm_bindgen::prelude::*;

mod encoder;
mod logging;

pub use encoder::JsGifEncoder;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logging::init(log::LevelFilter::Info);
}

/// Change how much of the encoder's logging reaches the console.
///
/// Accepts `off`, `error`, `warn`, `info`, `debug` or `trace`; returns false
/// for anything else.
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> bool {
    match level.parse::<log::LevelFilter>() {
        Ok(filter) => {
            log::set_max_level(filter);
            true
        }
        Err(_) => false,
    }
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_set_log_level() {
        assert!(set_log_level("debug"));
        assert_eq!(log::max_level(), log::LevelFilter::Debug);
        assert!(set_log_level("WARN"));
        assert_eq!(log::max_level(), log::LevelFilter::Warn);
        assert!(!set_log_level("loud"));
        assert_eq!(log::max_level(), log::LevelFilter::Warn);
    }
}
