// SPDX-License-Identifier: MIT
//
// Stateless parsing of the pending buffer.
//
// Every function here is pure: it reads the whole pending buffer from the
// first byte and reports what it holds. The decoder calls `parse` again
// after each appended byte, so a sequence is recognised the moment its
// final byte arrives and identical buffers always produce identical
// outcomes.
//
// The buffer never holds more than one in-flight sequence. A resolved
// outcome therefore always covers the entire buffer, and the outcomes
// below don't carry byte spans: the decoder attaches the buffer itself.
//
// Grammar handled:
//
//   CAN / SUB               drop the buffer
//   C0 control, DEL         single-byte special
//   ESC P ... ESC \         device control string
//   ESC ] ... ESC \         operating system command
//   ESC [ [<] args final    CSI (mouse, cursor report, anything else)
//   ESC x                   Alt + key
//   anything else           UTF-8 code point

use crate::event::{Motion, Mouse, MouseButton};
use crate::utf8;

/// Escape.
pub const ESC: u8 = 0x1B;
/// Cancel: aborts the sequence in progress.
pub const CAN: u8 = 0x18;
/// Substitute: aborts the sequence in progress.
pub const SUB: u8 = 0x1A;
/// Delete.
pub const DEL: u8 = 0x7F;

/// String Terminator closing DCS and OSC strings: `ESC \`.
const STRING_TERMINATOR: [u8; 2] = [ESC, b'\\'];

// ─── Outcome ────────────────────────────────────────────────────────────────

/// What the pending buffer currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The buffer is a prefix of something longer. Keep accumulating.
    Incomplete,
    /// Discard the buffer without emitting anything.
    Drop,
    /// The buffer is one complete UTF-8 sequence.
    Character,
    /// The buffer is a control byte or a complete escape sequence with no
    /// dedicated decoding.
    Special,
    /// The buffer is an SGR mouse report.
    Mouse(Mouse),
    /// The buffer is a cursor-position report.
    CursorPosition {
        /// First argument on the wire.
        row: u16,
        /// Second argument on the wire.
        column: u16,
    },
}

impl ParseOutcome {
    /// Whether the decoder should keep the buffer and wait for more bytes.
    #[must_use]
    pub const fn is_incomplete(&self) -> bool {
        matches!(self, Self::Incomplete)
    }
}

// ─── Dispatch ───────────────────────────────────────────────────────────────

/// Classify the pending buffer.
///
/// An empty buffer is [`Incomplete`](ParseOutcome::Incomplete).
#[must_use]
pub fn parse(buf: &[u8]) -> ParseOutcome {
    let Some(&first) = buf.first() else {
        return ParseOutcome::Incomplete;
    };

    match first {
        CAN | SUB => ParseOutcome::Drop,
        ESC => parse_escape(buf),
        0x00..=0x1F | DEL => ParseOutcome::Special,
        _ => utf8::parse(buf),
    }
}

// ── Escape sequences ────────────────────────────────────────────────────────

fn parse_escape(buf: &[u8]) -> ParseOutcome {
    debug_assert_eq!(buf[0], ESC);

    match buf.get(1).copied() {
        None => ParseOutcome::Incomplete,
        Some(b'P' | b']') => parse_string(buf),
        Some(b'[') => parse_csi(buf),
        // Alt + key: ESC followed by any other byte.
        Some(_) => ParseOutcome::Special,
    }
}

/// DCS / OSC: everything up to the String Terminator.
fn parse_string(buf: &[u8]) -> ParseOutcome {
    if buf[2..].windows(2).any(|w| w == STRING_TERMINATOR) {
        ParseOutcome::Special
    } else {
        ParseOutcome::Incomplete
    }
}

// ── CSI (Control Sequence Introducer) ───────────────────────────────────────

/// Arguments of a terminated CSI sequence.
struct Csi<'a> {
    /// `<` right after `ESC [`. SGR mouse reports carry it; nothing in the
    /// decoding depends on it yet.
    extended: bool,
    /// `;`-separated decimal arguments. An empty field counts as 0.
    args: &'a [u16],
    /// The terminating byte.
    final_byte: u8,
}

fn parse_csi(buf: &[u8]) -> ParseOutcome {
    debug_assert!(buf.len() >= 2 && buf[0] == ESC && buf[1] == b'[');

    let mut extended = false;
    let mut args: Vec<u16> = Vec::with_capacity(4);
    let mut current: u16 = 0;

    for (i, &b) in buf.iter().enumerate().skip(2) {
        match b {
            b'<' if i == 2 => extended = true,
            b'0'..=b'9' => {
                current = current
                    .saturating_mul(10)
                    .saturating_add(u16::from(b - b'0'));
            }
            b';' => {
                args.push(current);
                current = 0;
            }
            0x20..=0x7E => {
                args.push(current);
                return decode_csi(&Csi {
                    extended,
                    args: &args,
                    final_byte: b,
                });
            }
            // A fresh escape means the sequence was cut short.
            ESC => return ParseOutcome::Special,
            // Other controls and high bytes inside a CSI are ignored.
            _ => {}
        }
    }

    ParseOutcome::Incomplete
}

fn decode_csi(csi: &Csi<'_>) -> ParseOutcome {
    log::trace!(
        "csi final={:?} extended={} args={:?}",
        char::from(csi.final_byte),
        csi.extended,
        csi.args
    );

    match csi.final_byte {
        b'M' => decode_mouse(csi.args, Motion::Pressed),
        b'm' => decode_mouse(csi.args, Motion::Released),
        b'R' => decode_cursor_position(csi.args),
        _ => ParseOutcome::Special,
    }
}

// ── SGR Mouse Protocol ──────────────────────────────────────────────────────

/// `CSI < Pb ; Px ; Py M|m`. Anything but exactly three arguments is a
/// plain special sequence.
fn decode_mouse(args: &[u16], motion: Motion) -> ParseOutcome {
    let &[cb, x, y] = args else {
        return ParseOutcome::Special;
    };

    ParseOutcome::Mouse(Mouse {
        button: MouseButton::from_param(cb),
        motion,
        shift: cb & 4 != 0,
        meta: cb & 8 != 0,
        x,
        y,
    })
}

// ── Cursor Position Report ──────────────────────────────────────────────────

/// `CSI row ; column R`. Row comes first on the wire.
fn decode_cursor_position(args: &[u16]) -> ParseOutcome {
    let &[row, column] = args else {
        return ParseOutcome::Special;
    };
    ParseOutcome::CursorPosition { row, column }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
