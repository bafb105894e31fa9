// SPDX-License-Identifier: MIT
//
// Decoded input events.
//
// Every event carries the exact raw bytes the decoder consumed to produce
// it. Consumers that only care about semantics can ignore them; consumers
// that forward input (or compare against known sequences) get a lossless
// copy of what the terminal sent.

use std::fmt;

// ─── Event ──────────────────────────────────────────────────────────────────

/// A decoded terminal input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A printable character: one complete UTF-8 sequence (1–4 bytes).
    Character(Vec<u8>),
    /// A control byte, an escape sequence with no dedicated decoding,
    /// or a pending buffer forced out by the idle timeout.
    Special(Vec<u8>),
    /// An SGR mouse report (`CSI < Pb ; Px ; Py M|m`).
    Mouse(Vec<u8>, Mouse),
    /// A cursor-position report (`CSI row ; column R`).
    CursorPosition {
        /// Raw bytes of the report.
        bytes: Vec<u8>,
        /// 1-based row, as reported.
        row: u16,
        /// 1-based column, as reported.
        column: u16,
    },
}

impl Event {
    /// The raw bytes this event was decoded from.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Character(bytes)
            | Self::Special(bytes)
            | Self::Mouse(bytes, _)
            | Self::CursorPosition { bytes, .. } => bytes,
        }
    }

    /// Consume the event and return its raw bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Character(bytes)
            | Self::Special(bytes)
            | Self::Mouse(bytes, _)
            | Self::CursorPosition { bytes, .. } => bytes,
        }
    }

    #[must_use]
    pub const fn is_character(&self) -> bool {
        matches!(self, Self::Character(_))
    }

    #[must_use]
    pub const fn is_special(&self) -> bool {
        matches!(self, Self::Special(_))
    }

    #[must_use]
    pub const fn is_mouse(&self) -> bool {
        matches!(self, Self::Mouse(..))
    }

    /// The character of a [`Character`](Event::Character) event.
    ///
    /// The decoder only checks UTF-8 *boundaries*, not validity, so a
    /// structurally complete but invalid sequence (an overlong encoding,
    /// a surrogate) yields `None` here.
    #[must_use]
    pub fn character(&self) -> Option<char> {
        match self {
            Self::Character(bytes) => std::str::from_utf8(bytes).ok()?.chars().next(),
            _ => None,
        }
    }

    /// The mouse report of a [`Mouse`](Event::Mouse) event.
    #[must_use]
    pub const fn mouse(&self) -> Option<&Mouse> {
        match self {
            Self::Mouse(_, mouse) => Some(mouse),
            _ => None,
        }
    }

    /// `(row, column)` of a [`CursorPosition`](Event::CursorPosition) event.
    #[must_use]
    pub const fn cursor_position(&self) -> Option<(u16, u16)> {
        match self {
            Self::CursorPosition { row, column, .. } => Some((*row, *column)),
            _ => None,
        }
    }

    /// The raw bytes with control and non-ASCII bytes escaped, for logs
    /// and debug displays (`ESC [ A` renders as `\x1b[A`).
    #[must_use]
    pub fn escaped(&self) -> String {
        escape_bytes(self.bytes())
    }
}

/// Render bytes as printable ASCII, escaping everything else.
#[must_use]
pub fn escape_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .flat_map(|&b| std::ascii::escape_default(b))
        .map(char::from)
        .collect()
}

// ─── Mouse ──────────────────────────────────────────────────────────────────

/// A decoded SGR mouse report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mouse {
    /// Which button (or wheel direction) the report is about.
    pub button: MouseButton,
    /// Press or release, from the final byte (`M` / `m`).
    pub motion: Motion,
    /// Shift was held (bit value 4 of the button parameter).
    pub shift: bool,
    /// Meta / Alt was held (bit value 8 of the button parameter).
    pub meta: bool,
    /// 1-based column, as reported.
    pub x: u16,
    /// 1-based row, as reported.
    pub y: u16,
}

/// Press / release state of a mouse report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Final byte `M`.
    Pressed,
    /// Final byte `m`.
    Released,
}

/// Mouse button identity.
///
/// Derived from the SGR button parameter as
/// `(param & 3) + ((param & 64) >> 4)`, which yields 0–7. Every value in
/// that range has a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// No button (motion-only reports with all buttons up).
    None,
    WheelUp,
    WheelDown,
    WheelLeft,
    WheelRight,
}

impl MouseButton {
    /// Decode a button code in `0..=7`. Only the low three bits are used.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code & 0b111 {
            0 => Self::Left,
            1 => Self::Middle,
            2 => Self::Right,
            3 => Self::None,
            4 => Self::WheelUp,
            5 => Self::WheelDown,
            6 => Self::WheelLeft,
            _ => Self::WheelRight,
        }
    }

    /// Decode the button from a raw SGR button parameter.
    #[allow(clippy::cast_possible_truncation)] // Result is at most 7.
    #[must_use]
    pub const fn from_param(param: u16) -> Self {
        Self::from_code(((param & 3) + ((param & 64) >> 4)) as u8)
    }

    /// The numeric button code (`0..=7`).
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Left => 0,
            Self::Middle => 1,
            Self::Right => 2,
            Self::None => 3,
            Self::WheelUp => 4,
            Self::WheelDown => 5,
            Self::WheelLeft => 6,
            Self::WheelRight => 7,
        }
    }

    /// Whether this is a scroll wheel "button".
    #[must_use]
    pub const fn is_wheel(self) -> bool {
        self.code() >= 4
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Middle => "middle",
            Self::Right => "right",
            Self::None => "none",
            Self::WheelUp => "wheel-up",
            Self::WheelDown => "wheel-down",
            Self::WheelLeft => "wheel-left",
            Self::WheelRight => "wheel-right",
        };
        f.write_str(name)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
