//! The GIF89a stream encoder.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::blocks::{self, GraphicControl, ImageDescriptor};
use super::prepared::{load_frame, prepare_frame, prepare_frames, FrameParams, PreparedFrame};
use super::{EncodeError, EncoderSettings, SessionState, SettingOutcome};
use crate::frame::{FrameFit, PixelSource};
use crate::quantize::DEFAULT_QUALITY;
use crate::Rgb;

/// Canvas size used when `set_size` receives a non-positive dimension.
pub const DEFAULT_WIDTH: u16 = 320;
pub const DEFAULT_HEIGHT: u16 = 240;

/// Disposal method written when a transparent color is set: restore to
/// background.
const DISPOSE_TO_BACKGROUND: u8 = 2;

/// Encodes a sequence of frames into an animated GIF on `W`.
///
/// A session runs `start`, any number of `add_frame` calls, then `finish`.
/// After `finish` the same encoder can start a new stream on the same sink.
/// The canvas size is locked by `set_size` or by the first frame; later
/// frames of another size are fitted according to [`FrameFit`].
///
/// If the sink fails, the encoder enters [`SessionState::Failed`] and
/// rejects every further call.
pub struct GifEncoder<W: Write> {
    writer: W,
    state: SessionState,
    width: u16,
    height: u16,
    size_set: bool,
    x: u16,
    y: u16,
    transparent: Option<Rgb>,
    dispose: Option<i32>,
    /// Centiseconds.
    delay: u16,
    /// `None` omits the loop extension.
    repeat: Option<u16>,
    quality: u32,
    fit: FrameFit,
    first_frame: bool,
    frames_written: usize,
}

impl<W: Write> fmt::Debug for GifEncoder<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GifEncoder")
            .field("state", &self.state)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("size_set", &self.size_set)
            .field("delay", &self.delay)
            .field("repeat", &self.repeat)
            .field("quality", &self.quality)
            .field("frames_written", &self.frames_written)
            .finish_non_exhaustive()
    }
}

impl GifEncoder<BufWriter<File>> {
    /// Create (or truncate) `path` and encode into it through a buffer.
    ///
    /// `finish` flushes but keeps the file open; a restarted session appends
    /// its stream after the first one. The file is closed when the encoder
    /// is dropped or unwrapped with `into_inner`.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(GifEncoder::new(BufWriter::new(file)))
    }
}

fn ignore(what: fmt::Arguments<'_>) -> SettingOutcome {
    log::debug!("ignoring {}", what);
    SettingOutcome::Ignored
}

impl<W: Write> GifEncoder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            state: SessionState::NotStarted,
            width: 0,
            height: 0,
            size_set: false,
            x: 0,
            y: 0,
            transparent: None,
            dispose: None,
            delay: 0,
            repeat: None,
            quality: DEFAULT_QUALITY,
            fit: FrameFit::default(),
            first_frame: true,
            frames_written: 0,
        }
    }

    /// Create an encoder and apply `settings` to it.
    pub fn with_settings(writer: W, settings: &EncoderSettings) -> Self {
        let mut encoder = Self::new(writer);
        encoder.apply_settings(settings);
        encoder
    }

    // ===== Lifecycle =====

    /// Write the GIF signature and begin a stream.
    pub fn start(&mut self) -> Result<(), EncodeError> {
        match self.state {
            SessionState::Started => return Err(EncodeError::AlreadyStarted),
            SessionState::Failed => return Err(EncodeError::Failed),
            SessionState::NotStarted => {}
        }

        let result = blocks::write_signature(&mut self.writer);
        self.track(result)?;
        self.state = SessionState::Started;
        self.first_frame = true;
        self.frames_written = 0;
        log::debug!("gif stream started");
        Ok(())
    }

    /// Quantize, compress and append one frame.
    ///
    /// The first frame of a stream locks the canvas size unless `set_size`
    /// did. Invalid frames are rejected before anything is written.
    pub fn add_frame<S: PixelSource + ?Sized>(&mut self, frame: &S) -> Result<(), EncodeError> {
        self.ensure_started()?;
        let frame = load_frame(frame)?;
        self.lock_size(frame.width, frame.height);

        let prepared = prepare_frame(frame, &self.frame_params());
        self.write_prepared(&prepared)
    }

    /// Append a batch of frames in order.
    ///
    /// The output is the same as adding the frames one by one. With the
    /// `parallel` feature the frames are quantized and compressed
    /// concurrently. Every frame is loaded first, so an invalid frame
    /// anywhere in the batch means nothing is written.
    pub fn add_frames<S: PixelSource>(&mut self, frames: &[S]) -> Result<(), EncodeError> {
        self.ensure_started()?;
        let frames = frames.iter().map(load_frame).collect::<Result<Vec<_>, _>>()?;
        let Some(first) = frames.first() else {
            return Ok(());
        };
        self.lock_size(first.width, first.height);

        let prepared = prepare_frames(frames, &self.frame_params());
        for frame in &prepared {
            self.write_prepared(frame)?;
        }
        Ok(())
    }

    /// Write the trailer and flush. The encoder can then start a new stream.
    pub fn finish(&mut self) -> Result<(), EncodeError> {
        self.ensure_started()?;

        let result = blocks::write_trailer(&mut self.writer).and_then(|()| self.writer.flush());
        self.track(result)?;
        log::debug!("gif stream finished with {} frames", self.frames_written);

        self.state = SessionState::NotStarted;
        self.first_frame = true;
        Ok(())
    }

    // ===== Configuration =====

    /// Delay between frames in milliseconds, stored in whole centiseconds
    /// (rounded down).
    pub fn set_delay(&mut self, ms: u32) -> SettingOutcome {
        self.delay = (ms / 10).min(u16::MAX as u32) as u16;
        SettingOutcome::Applied
    }

    /// Delay from a frame rate: `round(100 / fps)` centiseconds.
    pub fn set_frame_rate(&mut self, fps: f32) -> SettingOutcome {
        if !fps.is_finite() || fps <= 0.0 {
            return ignore(format_args!("frame rate {}: must be positive", fps));
        }
        // float to int casts saturate
        self.delay = (100.0 / fps).round() as u16;
        SettingOutcome::Applied
    }

    /// Quantizer sampling stride; 1 is best, values below 1 are raised to 1.
    pub fn set_quality(&mut self, quality: i32) -> SettingOutcome {
        self.quality = quality.max(1) as u32;
        SettingOutcome::Applied
    }

    /// Fix the canvas size. Non-positive dimensions fall back to 320x240.
    ///
    /// Ignored once the current stream has written its first frame.
    pub fn set_size(&mut self, width: i32, height: i32) -> SettingOutcome {
        if self.state == SessionState::Started && !self.first_frame {
            return ignore(format_args!("size {}x{}: first frame already written", width, height));
        }
        let width = if width <= 0 { DEFAULT_WIDTH as i32 } else { width };
        let height = if height <= 0 { DEFAULT_HEIGHT as i32 } else { height };
        let (Ok(width), Ok(height)) = (u16::try_from(width), u16::try_from(height)) else {
            return ignore(format_args!("size {}x{}: exceeds 65535", width, height));
        };

        self.width = width;
        self.height = height;
        self.size_set = true;
        SettingOutcome::Applied
    }

    /// Offset of every following frame on the canvas.
    pub fn set_position(&mut self, x: u16, y: u16) -> SettingOutcome {
        self.x = x;
        self.y = y;
        SettingOutcome::Applied
    }

    /// Loop count: 0 loops forever, `n` plays `n` extra times.
    ///
    /// Written with the first frame of a stream, so a change after that only
    /// affects the next stream.
    pub fn set_repeat(&mut self, repeat: i32) -> SettingOutcome {
        if repeat < 0 {
            return ignore(format_args!("repeat {}: must be non-negative", repeat));
        }
        self.repeat = Some(repeat.min(u16::MAX as i32) as u16);
        SettingOutcome::Applied
    }

    /// Override the disposal method. Only the low 3 bits are written.
    pub fn set_dispose(&mut self, code: i32) -> SettingOutcome {
        if code < 0 {
            return ignore(format_args!("dispose {}: must be non-negative", code));
        }
        self.dispose = Some(code);
        SettingOutcome::Applied
    }

    /// Color to render transparent in following frames, or `None`.
    ///
    /// Each frame marks the used palette entry closest to this color.
    pub fn set_transparent(&mut self, color: Option<Rgb>) -> SettingOutcome {
        self.transparent = color;
        SettingOutcome::Applied
    }

    pub fn set_fit(&mut self, fit: FrameFit) -> SettingOutcome {
        self.fit = fit;
        SettingOutcome::Applied
    }

    /// Apply every present field of `settings`, returning each outcome
    /// labeled with its field name.
    pub fn apply_settings(&mut self, settings: &EncoderSettings) -> Vec<(&'static str, SettingOutcome)> {
        let mut outcomes = Vec::new();

        if let Some(ms) = settings.delay_ms {
            outcomes.push(("delayMs", self.set_delay(ms)));
        }
        if let Some(fps) = settings.frame_rate {
            outcomes.push(("frameRate", self.set_frame_rate(fps)));
        }
        if let Some(quality) = settings.quality {
            outcomes.push(("quality", self.set_quality(quality)));
        }
        if let Some(repeat) = settings.repeat {
            outcomes.push(("repeat", self.set_repeat(repeat)));
        }
        if let Some(code) = settings.dispose {
            outcomes.push(("dispose", self.set_dispose(code)));
        }
        if let Some(color) = settings.transparent {
            outcomes.push(("transparent", self.set_transparent(Some(color))));
        }
        if settings.width.is_some() || settings.height.is_some() {
            let width = settings.width.unwrap_or(self.width as i32);
            let height = settings.height.unwrap_or(self.height as i32);
            outcomes.push(("size", self.set_size(width, height)));
        }
        if settings.x.is_some() || settings.y.is_some() {
            let x = settings.x.unwrap_or(self.x);
            let y = settings.y.unwrap_or(self.y);
            outcomes.push(("position", self.set_position(x, y)));
        }
        if let Some(fit) = settings.fit {
            outcomes.push(("fit", self.set_fit(fit)));
        }

        outcomes
    }

    // ===== Accessors =====

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_started(&self) -> bool {
        self.state == SessionState::Started
    }

    /// Locked canvas size, if any.
    pub fn size(&self) -> Option<(u16, u16)> {
        self.size_set.then_some((self.width, self.height))
    }

    /// Frame delay in centiseconds.
    pub fn delay(&self) -> u16 {
        self.delay
    }

    pub fn quality(&self) -> u32 {
        self.quality
    }

    pub fn repeat(&self) -> Option<u16> {
        self.repeat
    }

    /// Frames written since the last `start`.
    pub fn frame_count(&self) -> usize {
        self.frames_written
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Recover the sink. An unfinished stream is left without a trailer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    // ===== Internals =====

    fn ensure_started(&self) -> Result<(), EncodeError> {
        match self.state {
            SessionState::Started => Ok(()),
            SessionState::NotStarted => Err(EncodeError::NotStarted),
            SessionState::Failed => Err(EncodeError::Failed),
        }
    }

    fn lock_size(&mut self, width: u32, height: u32) {
        if self.size_set {
            return;
        }
        // validated to fit in 16 bits
        self.width = width as u16;
        self.height = height as u16;
        self.size_set = true;
        log::debug!("canvas size locked to {}x{}", self.width, self.height);
    }

    fn frame_params(&self) -> FrameParams {
        FrameParams {
            width: self.width,
            height: self.height,
            quality: self.quality,
            fit: self.fit,
            transparent: self.transparent,
        }
    }

    fn disposal(&self) -> u8 {
        match self.dispose {
            Some(code) => (code & 0x07) as u8,
            None if self.transparent.is_some() => DISPOSE_TO_BACKGROUND,
            None => 0,
        }
    }

    /// Move to `Failed` if the sink returned an error.
    fn track<T>(&mut self, result: io::Result<T>) -> Result<T, EncodeError> {
        result.map_err(|err| {
            log::warn!("gif output failed, session is no longer usable: {}", err);
            self.state = SessionState::Failed;
            EncodeError::Io(err)
        })
    }

    fn write_prepared(&mut self, frame: &PreparedFrame) -> Result<(), EncodeError> {
        let result = self.write_frame_blocks(frame);
        self.track(result)?;
        self.first_frame = false;
        self.frames_written += 1;
        Ok(())
    }

    fn write_frame_blocks(&mut self, frame: &PreparedFrame) -> io::Result<()> {
        let gce = GraphicControl {
            disposal: self.disposal(),
            delay: self.delay,
            transparent_index: frame.transparent_index,
        };
        let desc = ImageDescriptor {
            left: self.x,
            top: self.y,
            width: frame.width,
            height: frame.height,
            local_table_bits: (!self.first_frame).then(|| frame.palette.size_bits()),
        };

        let w = &mut self.writer;
        if self.first_frame {
            blocks::write_screen_descriptor(w, self.width, self.height, frame.palette.size_bits())?;
            blocks::write_color_table(w, &frame.palette)?;
            if let Some(repeat) = self.repeat {
                blocks::write_loop_extension(w, repeat)?;
            }
        }
        blocks::write_graphic_control(w, &gce)?;
        blocks::write_image_descriptor(w, &desc)?;
        if !self.first_frame {
            blocks::write_color_table(w, &frame.palette)?;
        }
        w.write_all(&frame.image_data)
    }
}
