//! UTF-8 Safe String Utilities
//!
//! Rust strings are UTF-8 encoded, so slicing indices must fall on character
//! boundaries. Characters like `ø`, `中`, or `🎉` are multi-byte, and
//! `text[..100]` panics if byte 100 falls inside one of them. These helpers
//! adjust arbitrary byte positions onto valid boundaries before slicing, so
//! result previews can be cut at a byte budget safely.

// ─────────────────────────────────────────────────────────────────────────────
// Character Boundary Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Returns the largest index that is less than or equal to `index`
/// and is on a UTF-8 character boundary.
///
/// If `index` is greater than the string length, returns the string length.
#[inline]
pub fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }

    // Walk backwards to the start of the character containing `index`
    let bytes = s.as_bytes();
    let mut i = index;
    while i > 0 && !is_utf8_char_start(bytes[i]) {
        i -= 1;
    }
    i
}

/// Check if a byte is the start of a UTF-8 character.
///
/// UTF-8 continuation bytes have the form `10xxxxxx`; everything else
/// starts a character.
#[inline]
fn is_utf8_char_start(byte: u8) -> bool {
    (byte & 0xC0) != 0x80
}

// ─────────────────────────────────────────────────────────────────────────────
// Preview Truncation
// ─────────────────────────────────────────────────────────────────────────────

/// Truncate a line for display, appending `…` when content was cut.
///
/// `max_len` is a byte budget; the cut point is floored to a character
/// boundary so multi-byte characters are never split. Lines within budget
/// are returned unchanged.
pub fn truncate_with_ellipsis(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let cut = floor_char_boundary(s, max_len);
    format!("{}…", &s[..cut])
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_char_boundary_ascii() {
        let s = "hello";
        assert_eq!(floor_char_boundary(s, 0), 0);
        assert_eq!(floor_char_boundary(s, 3), 3);
        assert_eq!(floor_char_boundary(s, 5), 5);
        assert_eq!(floor_char_boundary(s, 99), 5);
    }

    #[test]
    fn test_floor_char_boundary_multibyte() {
        let s = "på"; // 'å' occupies bytes 1..3
        assert_eq!(floor_char_boundary(s, 2), 1);
        assert_eq!(floor_char_boundary(s, 1), 1);
        assert_eq!(floor_char_boundary(s, 3), 3);
    }

    #[test]
    fn test_floor_char_boundary_emoji() {
        let s = "a🎉b"; // emoji occupies bytes 1..5
        for idx in 2..5 {
            assert_eq!(floor_char_boundary(s, idx), 1);
        }
        assert_eq!(floor_char_boundary(s, 5), 5);
    }

    #[test]
    fn test_truncate_short_line_unchanged() {
        assert_eq!(truncate_with_ellipsis("short", 100), "short");
    }

    #[test]
    fn test_truncate_exact_length_unchanged() {
        assert_eq!(truncate_with_ellipsis("abcde", 5), "abcde");
    }

    #[test]
    fn test_truncate_long_line() {
        let long = "x".repeat(150);
        let out = truncate_with_ellipsis(&long, 100);
        assert_eq!(out, format!("{}…", "x".repeat(100)));
    }

    #[test]
    fn test_truncate_never_splits_multibyte() {
        // 50 party poppers: every cut point inside one must back off
        let s = "🎉".repeat(50);
        for budget in 1..12 {
            let out = truncate_with_ellipsis(&s, budget);
            assert!(out.ends_with('…'));
            // Valid UTF-8 by construction; verify the prefix is whole emoji
            let body = &out[..out.len() - '…'.len_utf8()];
            assert!(body.chars().all(|c| c == '🎉'));
        }
    }
}
