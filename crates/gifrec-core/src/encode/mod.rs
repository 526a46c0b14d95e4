//! GIF89a container encoding.
//!
//! This module provides functionality for:
//! - Driving an encoding session (`start`, `add_frame`, `finish`)
//! - Configuring delay, looping, transparency, disposal and canvas size
//! - Writing the individual GIF blocks
//!
//! # Architecture
//!
//! Adding a frame happens in two steps. Preparation fits the frame to the
//! canvas, quantizes it and compresses the indices; it reads only a snapshot
//! of the settings, so a batch can be prepared concurrently (see
//! [`GifEncoder::add_frames`]). Writing then appends the blocks in stream
//! order and is the only step that touches the sink.
//!
//! # Examples
//!
//! ```ignore
//! use gifrec_core::encode::GifEncoder;
//! use gifrec_core::frame::PackedFrame;
//!
//! let mut encoder = GifEncoder::create("out.gif")?;
//! encoder.set_repeat(0);
//! encoder.set_frame_rate(10.0);
//! encoder.start()?;
//! encoder.add_frame(&PackedFrame::filled(64, 64, 0xFFFF0000))?;
//! encoder.add_frame(&PackedFrame::filled(64, 64, 0xFF0000FF))?;
//! encoder.finish()?;
//! ```

pub mod blocks;
mod encoder;
mod prepared;
mod settings;
mod types;

pub use crate::frame::FrameFit;
pub use encoder::{GifEncoder, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use prepared::{load_frame, prepare_frame, prepare_frames, FrameParams, PreparedFrame};
pub use settings::EncoderSettings;
pub use types::{EncodeError, SessionState, SettingOutcome};
