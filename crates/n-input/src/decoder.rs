// SPDX-License-Identifier: MIT
//
// The decoder: pending buffer, idle timer, event delivery.
//
// Bytes arrive one at a time. After each byte the whole pending buffer is
// re-parsed (see `parse.rs`); as soon as it resolves to anything other
// than `Incomplete`, the buffer is handed to the sink as one event and
// cleared. Only one sequence is ever in flight.
//
//   Empty ──byte──▶ Accumulating ──byte──▶ (re-parse)
//                        │                      │
//                        │ idle ≥ threshold     │ resolved
//                        ▼                      ▼
//                   Special(buffer) ──────▶ Empty
//
// # Escape vs escape-sequence ambiguity
//
// A lone ESC is incomplete: it might be the Escape key, or the first byte
// of a sequence whose remaining bytes are a few milliseconds away. The
// caller reports idle time with [`Decoder::timeout`]; once the idle time
// since the last byte reaches the flush threshold, whatever is pending is
// emitted as a special event. The same flush clears anything else that
// can never complete on its own: malformed UTF-8, an unterminated OSC.

use std::time::Duration;

use crate::config::DecoderConfig;
use crate::event::Event;
use crate::parse::{self, ParseOutcome};
use crate::sink::EventSink;

/// Incremental terminal input decoder.
///
/// Not thread-safe by itself: drive it from one thread, or wrap it.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use n_input::{Decoder, Event};
///
/// let mut decoder = Decoder::new(Vec::<Event>::new());
/// decoder.feed(b"a\x1b[5;12R\x1b");
/// decoder.timeout(Duration::from_millis(50));
///
/// assert_eq!(
///     decoder.into_sink(),
///     vec![
///         Event::Character(b"a".to_vec()),
///         Event::CursorPosition { bytes: b"\x1b[5;12R".to_vec(), row: 5, column: 12 },
///         Event::Special(b"\x1b".to_vec()),
///     ]
/// );
/// ```
#[derive(Debug)]
pub struct Decoder<S> {
    /// Bytes received since the last resolved or dropped event.
    pending: Vec<u8>,
    /// Idle time accumulated since the last byte.
    idle: Duration,
    config: DecoderConfig,
    sink: S,
}

impl<S: EventSink> Decoder<S> {
    /// Create a decoder with the default configuration.
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self::with_config(DecoderConfig::default(), sink)
    }

    /// Create a decoder with a custom configuration.
    #[must_use]
    pub fn with_config(config: DecoderConfig, sink: S) -> Self {
        Self {
            pending: Vec::with_capacity(32),
            idle: Duration::ZERO,
            config,
            sink,
        }
    }

    /// Append one raw byte and deliver the event it completes, if any.
    ///
    /// Resets the idle timer. Returns the outcome of re-parsing the
    /// pending buffer.
    pub fn add(&mut self, byte: u8) -> ParseOutcome {
        self.pending.push(byte);
        self.idle = Duration::ZERO;

        let outcome = parse::parse(&self.pending);
        self.resolve(outcome);
        outcome
    }

    /// Append bytes in order, as if by repeated [`add`](Self::add).
    pub fn feed(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.add(byte);
        }
    }

    /// Report idle time since the previous report (or the last byte).
    ///
    /// When the accumulated idle time reaches the flush threshold, the
    /// timer restarts and any pending bytes are emitted as a single
    /// [`Event::Special`].
    pub fn timeout(&mut self, elapsed: Duration) {
        self.idle = self.idle.saturating_add(elapsed);
        if self.idle < self.config.flush_threshold() {
            return;
        }

        self.idle = Duration::ZERO;
        if !self.pending.is_empty() {
            log::debug!(
                "idle flush of {} pending byte(s): {}",
                self.pending.len(),
                crate::event::escape_bytes(&self.pending)
            );
            self.flush();
        }
    }

    /// Emit pending bytes as a special event right now.
    ///
    /// For end of input, where no further byte can ever arrive. No-op on
    /// an empty buffer.
    pub fn flush(&mut self) {
        if !self.pending.is_empty() {
            self.resolve(ParseOutcome::Special);
        }
    }

    /// Bytes waiting for the rest of their sequence.
    #[inline]
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Are there unresolved bytes?
    #[inline]
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Idle time accumulated toward the next flush.
    #[inline]
    #[must_use]
    pub const fn idle(&self) -> Duration {
        self.idle
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &DecoderConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the decoder and return its sink. Pending bytes are lost.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Turn a non-incomplete outcome into an event and clear the buffer.
    fn resolve(&mut self, outcome: ParseOutcome) {
        let event = match outcome {
            ParseOutcome::Incomplete => return,
            ParseOutcome::Drop => {
                log::debug!("dropping {} byte(s) on CAN/SUB", self.pending.len());
                self.pending.clear();
                return;
            }
            ParseOutcome::Character => Event::Character(self.take_pending()),
            ParseOutcome::Special => Event::Special(self.take_pending()),
            ParseOutcome::Mouse(mouse) => Event::Mouse(self.take_pending(), mouse),
            ParseOutcome::CursorPosition { row, column } => Event::CursorPosition {
                bytes: self.take_pending(),
                row,
                column,
            },
        };

        log::trace!("decoded {event:?}");
        self.sink.push(event);
    }

    fn take_pending(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.pending)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
