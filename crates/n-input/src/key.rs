// SPDX-License-Identifier: MIT
//
// Key classification. Names the keys behind decoded events.
//
// The decoder hands out raw spans; this module recognises the common ones
// (control bytes, Alt+key, cursor and editing keys, function keys) so a
// consumer can match on `KeyCode::Up` instead of `b"\x1b[A"`. It is a
// read-only view: nothing here feeds back into decoding, and spans it
// doesn't know stay unnamed.

use std::fmt;

use bitflags::bitflags;

use crate::event::Event;
use crate::parse::{DEL, ESC};

/// A named key with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

/// Identity of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// A Unicode character. Ctrl+letter is `Char` with [`Modifiers::CTRL`].
    Char(char),
    // ── Named keys ──────────────────────────────────────────────
    Enter,
    Tab,
    BackTab,
    Backspace,
    Escape,
    Delete,
    Insert,
    // ── Navigation ──────────────────────────────────────────────
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    // ── Function keys ───────────────────────────────────────────
    /// F1 through F20.
    F(u8),
}

bitflags! {
    /// Keyboard modifier flags.
    ///
    /// Bit layout matches xterm's modifier parameter, where
    /// `param = 1 + bitmask`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
        const SUPER = 0b0000_1000;
    }
}

impl Key {
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
        }
    }

    #[must_use]
    pub const fn with(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }
}

impl fmt::Display for Key {
    /// `Ctrl+Shift+Up`, `Alt+x`, `F5`, `é`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [
            (Modifiers::CTRL, "Ctrl"),
            (Modifiers::ALT, "Alt"),
            (Modifiers::SHIFT, "Shift"),
            (Modifiers::SUPER, "Super"),
        ] {
            if self.modifiers.contains(flag) {
                write!(f, "{name}+")?;
            }
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("Space"),
            KeyCode::Char(ch) => write!(f, "{ch}"),
            KeyCode::F(n) => write!(f, "F{n}"),
            code => write!(f, "{code:?}"),
        }
    }
}

impl Event {
    /// The key this event encodes, if it is a recognised one.
    ///
    /// Mouse and cursor-position events never name a key.
    #[must_use]
    pub fn key(&self) -> Option<Key> {
        match self {
            Self::Character(_) => self.character().map(|ch| Key::new(KeyCode::Char(ch))),
            Self::Special(bytes) => classify_special(bytes),
            Self::Mouse(..) | Self::CursorPosition { .. } => None,
        }
    }
}

/// Name the key behind a special span.
#[must_use]
pub fn classify_special(bytes: &[u8]) -> Option<Key> {
    match *bytes {
        [b] => control_key(b),
        [ESC, ESC] => Some(Key::with(KeyCode::Escape, Modifiers::ALT)),
        [ESC, b'[', ref rest @ ..] if !rest.is_empty() => csi_key(rest),
        [ESC, b] => alt_key(b),
        _ => None,
    }
}

// ── Single bytes ────────────────────────────────────────────────────────────

fn control_key(byte: u8) -> Option<Key> {
    let key = match byte {
        ESC => Key::new(KeyCode::Escape),
        0x00 => Key::with(KeyCode::Char('@'), Modifiers::CTRL),
        0x08 | DEL => Key::new(KeyCode::Backspace),
        0x09 => Key::new(KeyCode::Tab),
        0x0A | 0x0D => Key::new(KeyCode::Enter),
        b @ 0x01..=0x1A => Key::with(KeyCode::Char(char::from(b + b'a' - 1)), Modifiers::CTRL),
        _ => return None,
    };
    Some(key)
}

fn alt_key(byte: u8) -> Option<Key> {
    match byte {
        b @ 0x20..=0x7E => Some(Key::with(KeyCode::Char(char::from(b)), Modifiers::ALT)),
        _ => control_key(byte).map(|key| Key::with(key.code, key.modifiers | Modifiers::ALT)),
    }
}

// ── CSI keys ────────────────────────────────────────────────────────────────

/// `rest` is everything after `ESC [`, final byte included.
fn csi_key(rest: &[u8]) -> Option<Key> {
    let (&final_byte, params_raw) = rest.split_last()?;
    let params = parse_params(params_raw)?;
    let modifiers = params
        .get(1)
        .map_or(Modifiers::empty(), |&p| decode_modifiers(p));

    if final_byte == b'~' {
        let code = match params.first().copied().unwrap_or(0) {
            1 | 7 => KeyCode::Home,
            2 => KeyCode::Insert,
            3 => KeyCode::Delete,
            4 | 8 => KeyCode::End,
            5 => KeyCode::PageUp,
            6 => KeyCode::PageDown,
            15 => KeyCode::F(5),
            17 => KeyCode::F(6),
            18 => KeyCode::F(7),
            19 => KeyCode::F(8),
            20 => KeyCode::F(9),
            21 => KeyCode::F(10),
            23 => KeyCode::F(11),
            24 => KeyCode::F(12),
            25 => KeyCode::F(13),
            26 => KeyCode::F(14),
            28 => KeyCode::F(15),
            29 => KeyCode::F(16),
            31 => KeyCode::F(17),
            32 => KeyCode::F(18),
            33 => KeyCode::F(19),
            34 => KeyCode::F(20),
            _ => return None,
        };
        return Some(Key::with(code, modifiers));
    }

    let code = match final_byte {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'P' => KeyCode::F(1),
        b'Q' => KeyCode::F(2),
        // `CSI 1;N R` is a cursor report, so only bare `CSI R` reaches here.
        b'R' => KeyCode::F(3),
        b'S' => KeyCode::F(4),
        b'Z' => return Some(Key::with(KeyCode::BackTab, Modifiers::SHIFT)),
        _ => return None,
    };
    Some(Key::with(code, modifiers))
}

/// Parse `;`-separated decimal parameters. Rejects anything else, so
/// private-mode replies like `?1;2c` aren't mistaken for keys.
fn parse_params(raw: &[u8]) -> Option<Vec<u16>> {
    if raw.is_empty() {
        return Some(Vec::new());
    }
    raw.split(|&b| b == b';')
        .map(|field| {
            field.iter().try_fold(0u16, |acc, &b| {
                b.is_ascii_digit()
                    .then(|| acc.saturating_mul(10).saturating_add(u16::from(b - b'0')))
            })
        })
        .collect()
}

/// Decode an xterm modifier parameter (`1 + bitmask`). 0 and 1 mean none.
/// Only the low four bits carry flags we track.
#[allow(clippy::cast_possible_truncation)]
const fn decode_modifiers(param: u16) -> Modifiers {
    let val = if param > 0 { param - 1 } else { 0 };
    Modifiers::from_bits_truncate(val as u8)
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn special(bytes: &[u8]) -> Option<Key> {
        Event::Special(bytes.to_vec()).key()
    }

    fn key(code: KeyCode) -> Option<Key> {
        Some(Key::new(code))
    }

    fn key_mod(code: KeyCode, modifiers: Modifiers) -> Option<Key> {
        Some(Key::with(code, modifiers))
    }

    // ── Characters ──────────────────────────────────────────────────────

    #[test]
    fn character_event() {
        assert_eq!(Event::Character(b"a".to_vec()).key(), key(KeyCode::Char('a')));
        assert_eq!(
            Event::Character("ß".as_bytes().to_vec()).key(),
            key(KeyCode::Char('ß'))
        );
    }

    // ── Control bytes ───────────────────────────────────────────────────

    #[test]
    fn enter_tab_backspace() {
        assert_eq!(special(b"\r"), key(KeyCode::Enter));
        assert_eq!(special(b"\n"), key(KeyCode::Enter));
        assert_eq!(special(b"\t"), key(KeyCode::Tab));
        assert_eq!(special(b"\x7f"), key(KeyCode::Backspace));
        assert_eq!(special(b"\x08"), key(KeyCode::Backspace));
    }

    #[test]
    fn ctrl_letters() {
        assert_eq!(special(b"\x01"), key_mod(KeyCode::Char('a'), Modifiers::CTRL));
        assert_eq!(special(b"\x03"), key_mod(KeyCode::Char('c'), Modifiers::CTRL));
        assert_eq!(special(b"\x00"), key_mod(KeyCode::Char('@'), Modifiers::CTRL));
    }

    #[test]
    fn unnamed_controls() {
        assert_eq!(special(b"\x1c"), None);
        assert_eq!(special(b"\x1f"), None);
    }

    #[test]
    fn flushed_lone_escape() {
        assert_eq!(special(b"\x1b"), key(KeyCode::Escape));
    }

    // ── Alt ─────────────────────────────────────────────────────────────

    #[test]
    fn alt_printable() {
        assert_eq!(special(b"\x1bx"), key_mod(KeyCode::Char('x'), Modifiers::ALT));
        // A timeout-flushed `ESC [` is Alt+[.
        assert_eq!(special(b"\x1b["), key_mod(KeyCode::Char('['), Modifiers::ALT));
    }

    #[test]
    fn alt_escape() {
        assert_eq!(special(b"\x1b\x1b"), key_mod(KeyCode::Escape, Modifiers::ALT));
    }

    #[test]
    fn alt_ctrl() {
        assert_eq!(
            special(b"\x1b\x01"),
            key_mod(KeyCode::Char('a'), Modifiers::ALT | Modifiers::CTRL)
        );
        assert_eq!(special(b"\x1b\r"), key_mod(KeyCode::Enter, Modifiers::ALT));
    }

    // ── CSI ─────────────────────────────────────────────────────────────

    #[test]
    fn arrows() {
        assert_eq!(special(b"\x1b[A"), key(KeyCode::Up));
        assert_eq!(special(b"\x1b[B"), key(KeyCode::Down));
        assert_eq!(special(b"\x1b[C"), key(KeyCode::Right));
        assert_eq!(special(b"\x1b[D"), key(KeyCode::Left));
    }

    #[test]
    fn arrows_with_modifiers() {
        assert_eq!(special(b"\x1b[1;2A"), key_mod(KeyCode::Up, Modifiers::SHIFT));
        assert_eq!(special(b"\x1b[1;3B"), key_mod(KeyCode::Down, Modifiers::ALT));
        assert_eq!(special(b"\x1b[1;5C"), key_mod(KeyCode::Right, Modifiers::CTRL));
        assert_eq!(
            special(b"\x1b[1;6D"),
            key_mod(KeyCode::Left, Modifiers::SHIFT | Modifiers::CTRL)
        );
    }

    #[test]
    fn home_end() {
        assert_eq!(special(b"\x1b[H"), key(KeyCode::Home));
        assert_eq!(special(b"\x1b[F"), key(KeyCode::End));
        assert_eq!(special(b"\x1b[1~"), key(KeyCode::Home));
        assert_eq!(special(b"\x1b[4~"), key(KeyCode::End));
    }

    #[test]
    fn editing_keys() {
        assert_eq!(special(b"\x1b[2~"), key(KeyCode::Insert));
        assert_eq!(special(b"\x1b[3~"), key(KeyCode::Delete));
        assert_eq!(special(b"\x1b[5~"), key(KeyCode::PageUp));
        assert_eq!(special(b"\x1b[6~"), key(KeyCode::PageDown));
        assert_eq!(special(b"\x1b[3;5~"), key_mod(KeyCode::Delete, Modifiers::CTRL));
    }

    #[test]
    fn function_keys() {
        assert_eq!(special(b"\x1b[P"), key(KeyCode::F(1)));
        assert_eq!(special(b"\x1b[S"), key(KeyCode::F(4)));
        assert_eq!(special(b"\x1b[15~"), key(KeyCode::F(5)));
        assert_eq!(special(b"\x1b[24~"), key(KeyCode::F(12)));
        assert_eq!(special(b"\x1b[1;2P"), key_mod(KeyCode::F(1), Modifiers::SHIFT));
    }

    #[test]
    fn back_tab() {
        assert_eq!(special(b"\x1b[Z"), key_mod(KeyCode::BackTab, Modifiers::SHIFT));
    }

    #[test]
    fn unknown_csi() {
        assert_eq!(special(b"\x1b[99~"), None);
        assert_eq!(special(b"\x1b[c"), None);
        // Private-mode prefix terminates the CSI early in the decoder.
        assert_eq!(special(b"\x1b[?"), None);
    }

    #[test]
    fn strings_are_unnamed() {
        assert_eq!(special(b"\x1b]0;x\x1b\\"), None);
    }

    #[test]
    fn mouse_and_cursor_events_are_unnamed() {
        let report = Event::CursorPosition {
            bytes: b"\x1b[1;1R".to_vec(),
            row: 1,
            column: 1,
        };
        assert_eq!(report.key(), None);
    }

    // ── Display ─────────────────────────────────────────────────────────

    #[test]
    fn display_names() {
        assert_eq!(Key::new(KeyCode::Char('a')).to_string(), "a");
        assert_eq!(Key::new(KeyCode::Char(' ')).to_string(), "Space");
        assert_eq!(Key::new(KeyCode::F(5)).to_string(), "F5");
        assert_eq!(Key::new(KeyCode::PageDown).to_string(), "PageDown");
        assert_eq!(
            Key::with(KeyCode::Up, Modifiers::SHIFT | Modifiers::CTRL).to_string(),
            "Ctrl+Shift+Up"
        );
        assert_eq!(
            Key::with(KeyCode::Char('x'), Modifiers::ALT).to_string(),
            "Alt+x"
        );
    }

    // ── Helpers ─────────────────────────────────────────────────────────

    #[test]
    fn params_parse() {
        assert_eq!(parse_params(b""), Some(vec![]));
        assert_eq!(parse_params(b"1;5"), Some(vec![1, 5]));
        assert_eq!(parse_params(b"15"), Some(vec![15]));
        assert_eq!(parse_params(b";"), Some(vec![0, 0]));
        assert_eq!(parse_params(b"?1"), None);
    }

    #[test]
    fn modifier_decoding() {
        assert_eq!(decode_modifiers(0), Modifiers::empty());
        assert_eq!(decode_modifiers(1), Modifiers::empty());
        assert_eq!(decode_modifiers(2), Modifiers::SHIFT);
        assert_eq!(decode_modifiers(4), Modifiers::SHIFT | Modifiers::ALT);
        assert_eq!(decode_modifiers(9), Modifiers::SUPER);
    }
}
