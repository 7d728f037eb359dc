//! Per-line match extraction
//!
//! Applies a compiled [`Matcher`] to a single line, producing zero or more
//! [`MatchSpan`]s. The line number is supplied by the caller; this layer
//! knows nothing about documents.

use crate::search::Matcher;

// ─────────────────────────────────────────────────────────────────────────────
// Match Span
// ─────────────────────────────────────────────────────────────────────────────

/// A single match: 1-based line number plus a half-open byte range
/// `[start, end)` within that line. Immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    /// Line number, 1-based
    pub line: usize,
    /// Byte offset of the match start within the line
    pub start: usize,
    /// Byte offset one past the match end
    pub end: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// Line Scanning
// ─────────────────────────────────────────────────────────────────────────────

/// Find every non-overlapping occurrence of `matcher` in `line`.
///
/// Leftmost match wins and the scan resumes after its end, so overlapping
/// occurrences are not reported. Zero-width matches (possible with regex
/// terms like `a*`) are dropped: they carry no navigable location.
pub fn find_in_line(matcher: &Matcher, line_number: usize, line: &str) -> Vec<MatchSpan> {
    matcher
        .find_iter(line)
        .filter(|m| m.start() < m.end())
        .map(|m| MatchSpan {
            line: line_number,
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
