// SPDX-License-Identifier: MIT
//
// Event viewer: one line per decoded event.
//
//   char      a                   a
//   key       Ctrl+Shift+Up       \x1b[1;6A
//   mouse     left pressed 10,20  \x1b[<0;10;20M
//   cursor    row 5 col 12        \x1b[5;12R
//   special                       \x1b]11;rgb:0000/0000/0000\x1b\\
//
// In raw mode the terminal no longer translates `\n` into a carriage
// return plus line feed, so lines end in `\r\n` when stdout is a TTY.

use std::io::Write;

use n_input::{Event, Motion};

use crate::driver::{Action, App};
use crate::error::Result;

/// Ctrl-C: with ISIG off, this is the only way out of an interactive run.
const QUIT_BYTE: &[u8] = b"\x03";

/// Prints events to a writer.
pub struct Viewer<W: Write> {
    out: W,
    /// Print only the escaped raw bytes.
    raw: bool,
    line_end: &'static str,
}

impl<W: Write> Viewer<W> {
    #[must_use]
    pub const fn new(out: W, raw: bool, crlf: bool) -> Self {
        Self {
            out,
            raw,
            line_end: if crlf { "\r\n" } else { "\n" },
        }
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> App for Viewer<W> {
    fn on_event(&mut self, event: &Event) -> Result<Action> {
        if self.raw {
            write!(self.out, "{}{}", event.escaped(), self.line_end)?;
        } else {
            let (kind, detail) = describe(event);
            write!(
                self.out,
                "{kind:<9} {detail:<19} {}{}",
                event.escaped(),
                self.line_end
            )?;
        }
        self.out.flush()?;

        if event.bytes() == QUIT_BYTE {
            log::debug!("quit byte received");
            return Ok(Action::Quit);
        }
        Ok(Action::Continue)
    }
}

/// Column one and two of a viewer line.
fn describe(event: &Event) -> (&'static str, String) {
    match event {
        Event::Character(_) => (
            "char",
            event
                .character()
                .map_or_else(|| "<invalid>".to_string(), String::from),
        ),
        Event::Special(_) => event
            .key()
            .map_or(("special", String::new()), |key| ("key", key.to_string())),
        Event::Mouse(_, mouse) => {
            let motion = match mouse.motion {
                Motion::Pressed => "pressed",
                Motion::Released => "released",
            };
            let mut detail = format!("{} {motion} {},{}", mouse.button, mouse.x, mouse.y);
            if mouse.shift {
                detail.push_str(" shift");
            }
            if mouse.meta {
                detail.push_str(" meta");
            }
            ("mouse", detail)
        }
        Event::CursorPosition { row, column, .. } => ("cursor", format!("row {row} col {column}")),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use n_input::{Mouse, MouseButton};
    use pretty_assertions::assert_eq;

    fn render(events: &[Event], raw: bool) -> String {
        let mut viewer = Viewer::new(Vec::new(), raw, false);
        for event in events {
            viewer.on_event(event).unwrap();
        }
        String::from_utf8(viewer.into_inner()).unwrap()
    }

    #[test]
    fn character_line() {
        assert_eq!(
            render(&[Event::Character(b"a".to_vec())], false),
            format!("{:<9} {:<19} a\n", "char", "a")
        );
    }

    #[test]
    fn named_key_line() {
        let out = render(&[Event::Special(b"\x1b[1;5A".to_vec())], false);
        assert!(out.starts_with(&format!("{:<9} Ctrl+Up ", "key")), "{out:?}");
        assert!(out.ends_with("\\x1b[1;5A\n"), "{out:?}");
    }

    #[test]
    fn unnamed_special_line() {
        let out = render(&[Event::Special(b"\x1b]0;t\x1b\\".to_vec())], false);
        assert!(out.starts_with("special "), "{out:?}");
    }

    #[test]
    fn mouse_line() {
        let event = Event::Mouse(
            b"\x1b[<12;3;4m".to_vec(),
            Mouse {
                button: MouseButton::Left,
                motion: Motion::Released,
                shift: true,
                meta: true,
                x: 3,
                y: 4,
            },
        );
        let out = render(&[event], false);
        assert!(out.contains("left released 3,4 shift meta"), "{out:?}");
    }

    #[test]
    fn cursor_line() {
        let event = Event::CursorPosition {
            bytes: b"\x1b[5;12R".to_vec(),
            row: 5,
            column: 12,
        };
        assert!(render(&[event], false).contains("row 5 col 12"));
    }

    #[test]
    fn raw_mode_prints_bytes_only() {
        assert_eq!(
            render(&[Event::Special(b"\x1b[A".to_vec())], true),
            "\\x1b[A\n"
        );
    }

    #[test]
    fn crlf_line_endings() {
        let mut viewer = Viewer::new(Vec::new(), true, true);
        viewer.on_event(&Event::Character(b"z".to_vec())).unwrap();
        assert_eq!(viewer.into_inner(), b"z\r\n");
    }

    #[test]
    fn ctrl_c_quits() {
        let mut viewer = Viewer::new(Vec::new(), true, false);
        assert_eq!(
            viewer.on_event(&Event::Character(b"q".to_vec())).unwrap(),
            Action::Continue
        );
        assert_eq!(
            viewer.on_event(&Event::Special(b"\x03".to_vec())).unwrap(),
            Action::Quit
        );
    }
}
