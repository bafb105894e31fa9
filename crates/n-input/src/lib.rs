// SPDX-License-Identifier: MIT
//
// n-input — incremental terminal input decoder.
//
// Raw bytes from a terminal in raw mode go in one at a time; structured
// events come out: printable characters, control and function keys,
// SGR mouse reports, cursor-position reports. There are no delimiters
// between sequences on the wire, so the decoder re-parses its pending
// buffer after every byte and emits an event the moment the buffer holds
// one complete sequence.
//
// A bare ESC is indistinguishable from the first byte of an escape
// sequence until time passes. The caller reports idle time and the
// decoder flushes whatever is pending once it reaches a threshold.
//
// The crate does no I/O and sets no terminal modes. Putting the terminal
// in raw mode and enabling mouse or cursor reporting is the caller's job.

pub mod config;
pub mod decoder;
pub mod event;
pub mod key;
pub mod parse;
pub mod sink;
pub mod utf8;

pub use config::{ConfigError, DecoderConfig, DEFAULT_FLUSH_THRESHOLD};
pub use decoder::Decoder;
pub use event::{Event, Motion, Mouse, MouseButton};
pub use key::{Key, KeyCode, Modifiers};
pub use parse::{parse, ParseOutcome};
pub use sink::EventSink;
