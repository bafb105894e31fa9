// SPDX-License-Identifier: MIT
//
// Decoder configuration.

use std::time::Duration;

/// Idle time after which pending bytes are flushed as a special event.
///
/// Terminals emit every byte of an escape sequence in one burst, so
/// follow-up bytes arrive within a few milliseconds. 50ms of silence after
/// a lone ESC means the user pressed Escape.
pub const DEFAULT_FLUSH_THRESHOLD: Duration = Duration::from_millis(50);

/// Invalid decoder configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A zero threshold would flush every partial sequence on the first tick.
    #[error("flush threshold must be greater than zero")]
    ZeroThreshold,
}

/// Decoder tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    flush_threshold: Duration,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
        }
    }
}

impl DecoderConfig {
    /// Override the idle flush threshold.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroThreshold`] if `threshold` is zero.
    pub fn with_flush_threshold(self, threshold: Duration) -> Result<Self, ConfigError> {
        if threshold.is_zero() {
            return Err(ConfigError::ZeroThreshold);
        }
        Ok(Self {
            flush_threshold: threshold,
        })
    }

    /// Accumulated idle time that forces pending bytes out.
    #[inline]
    #[must_use]
    pub const fn flush_threshold(&self) -> Duration {
        self.flush_threshold
    }
}
