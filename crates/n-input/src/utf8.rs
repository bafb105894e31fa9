// SPDX-License-Identifier: MIT
//
// UTF-8 boundary detection.
//
// The decoder only needs to know where a code point ends, not whether it
// is a valid scalar value. The lead byte's run of leading one bits gives
// the sequence length; every following byte must look like a continuation
// byte (`10xxxxxx`).
//
//   ┌──────────┬──────────┬──────────┬──────────┐
//   │ byte 1   │ byte 2   │ byte 3   │ byte 4   │
//   ├──────────┼──────────┼──────────┼──────────┤
//   │ 0xxxxxxx │          │          │          │
//   │ 110xxxxx │ 10xxxxxx │          │          │
//   │ 1110xxxx │ 10xxxxxx │ 10xxxxxx │          │
//   │ 11110xxx │ 10xxxxxx │ 10xxxxxx │ 10xxxxxx │
//   └──────────┴──────────┴──────────┴──────────┘
//
// Anything that doesn't fit (a stray continuation byte as lead, a lead
// with five or more ones, a bad continuation byte) leaves the buffer
// incomplete. The idle-timeout flush is what eventually clears it.

use crate::parse::ParseOutcome;

/// Expected byte length of a UTF-8 sequence from its lead byte.
///
/// Returns `None` for bytes that cannot start a sequence: continuation
/// bytes (one leading one) and `0xF8..=0xFF` (five or more).
#[must_use]
pub const fn sequence_len(lead: u8) -> Option<usize> {
    match lead.leading_ones() {
        0 => Some(1),
        n @ 2..=4 => Some(n as usize),
        _ => None,
    }
}

/// Whether `byte` has the continuation pattern `10xxxxxx`.
#[must_use]
pub const fn is_continuation(byte: u8) -> bool {
    byte & 0b1100_0000 == 0b1000_0000
}

/// Find the boundary of the UTF-8 sequence at the start of `buf`.
///
/// `buf` must be non-empty. Bytes past the end of the sequence are not
/// examined, but the decoder never holds any: it resolves as soon as the
/// last continuation byte arrives.
pub(crate) fn parse(buf: &[u8]) -> ParseOutcome {
    let Some(len) = sequence_len(buf[0]) else {
        return ParseOutcome::Incomplete;
    };

    let available = buf.len().min(len);
    if !buf[1..available].iter().all(|&b| is_continuation(b)) {
        return ParseOutcome::Incomplete;
    }
    if buf.len() < len {
        return ParseOutcome::Incomplete;
    }

    ParseOutcome::Character
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_ascii() {
        assert_eq!(sequence_len(b'a'), Some(1));
        assert_eq!(sequence_len(0x7F), Some(1));
    }

    #[test]
    fn len_two_byte() {
        assert_eq!(sequence_len(0xC3), Some(2));
        assert_eq!(sequence_len(0xDF), Some(2));
    }

    #[test]
    fn len_three_byte() {
        assert_eq!(sequence_len(0xE2), Some(3));
    }

    #[test]
    fn len_four_byte() {
        assert_eq!(sequence_len(0xF0), Some(4));
        assert_eq!(sequence_len(0xF7), Some(4));
    }

    #[test]
    fn len_invalid_leads() {
        assert_eq!(sequence_len(0x80), None);
        assert_eq!(sequence_len(0xBF), None);
        assert_eq!(sequence_len(0xF8), None);
        assert_eq!(sequence_len(0xFF), None);
    }

    #[test]
    fn continuation_pattern() {
        assert!(is_continuation(0x80));
        assert!(is_continuation(0xBF));
        assert!(!is_continuation(0x7F));
        assert!(!is_continuation(0xC0));
    }

    #[test]
    fn complete_sequences() {
        assert_eq!(parse(b"a"), ParseOutcome::Character);
        assert_eq!(parse("é".as_bytes()), ParseOutcome::Character);
        assert_eq!(parse("€".as_bytes()), ParseOutcome::Character);
        assert_eq!(parse("🦀".as_bytes()), ParseOutcome::Character);
    }

    #[test]
    fn truncated_sequences_wait() {
        let crab = "🦀".as_bytes();
        for end in 1..crab.len() {
            assert_eq!(parse(&crab[..end]), ParseOutcome::Incomplete);
        }
    }

    #[test]
    fn bad_continuation_stays_incomplete() {
        assert_eq!(parse(&[0xE2, b'a']), ParseOutcome::Incomplete);
        assert_eq!(parse(&[0xE2, 0x82, b'a']), ParseOutcome::Incomplete);
    }

    #[test]
    fn invalid_lead_stays_incomplete() {
        assert_eq!(parse(&[0xFF]), ParseOutcome::Incomplete);
        assert_eq!(parse(&[0x80]), ParseOutcome::Incomplete);
    }
}
