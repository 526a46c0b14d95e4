//! Core types for GIF encoding.

use thiserror::Error;

/// Error types for GIF encoding operations.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// `add_frame` or `finish` was called before `start`.
    #[error("Encoder has not been started")]
    NotStarted,

    /// `start` was called on a running session.
    #[error("Encoder is already started")]
    AlreadyStarted,

    /// An earlier write failed; the partial stream is corrupt and the
    /// encoder must be discarded.
    #[error("Encoder is unusable after an earlier I/O failure")]
    Failed,

    /// The frame has zero area or its pixel buffer does not match its size.
    #[error("Invalid frame: {width}x{height} with {len} pixels")]
    InvalidFrame { width: u32, height: u32, len: usize },

    /// GIF dimensions are 16-bit.
    #[error("Frame dimensions {width}x{height} exceed the GIF limit of 65535")]
    TooLarge { width: u32, height: u32 },

    /// The output sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of a configuration call.
///
/// Out-of-range values are ignored rather than rejected, leaving the previous
/// setting in place; the outcome makes that visible to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingOutcome {
    /// The value (possibly clamped) is now in effect.
    Applied,
    /// The value was out of range or arrived too late and was discarded.
    Ignored,
}

impl SettingOutcome {
    #[inline]
    pub fn is_applied(self) -> bool {
        self == SettingOutcome::Applied
    }
}

/// Lifecycle of an encoding session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Idle: before `start` or after `finish`.
    #[default]
    NotStarted,
    /// Header written, frames may be added.
    Started,
    /// A write failed; every further call is rejected.
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(EncodeError::NotStarted.to_string(), "Encoder has not been started");
        let err = EncodeError::InvalidFrame {
            width: 0,
            height: 4,
            len: 0,
        };
        assert_eq!(err.to_string(), "Invalid frame: 0x4 with 0 pixels");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        let err: EncodeError = io.into();
        assert!(matches!(err, EncodeError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_setting_outcome() {
        assert!(SettingOutcome::Applied.is_applied());
        assert!(!SettingOutcome::Ignored.is_applied());
    }

    #[test]
    fn test_default_state() {
        assert_eq!(SessionState::default(), SessionState::NotStarted);
    }
}
