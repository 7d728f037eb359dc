//! Whole-document match scanning
//!
//! Applies per-line matching across one document's lines, producing an
//! ordered match list with per-match previews and a total count. Scans are
//! side-effect-free and recomputed wholesale on every invocation; there is
//! no incremental diffing.

use crate::search::line::{find_in_line, MatchSpan};
use crate::search::Matcher;
use crate::string_utils::truncate_with_ellipsis;

/// Default byte budget for rendered result previews.
pub const DEFAULT_PREVIEW_MAX_LEN: usize = 100;

// ─────────────────────────────────────────────────────────────────────────────
// Document Matches
// ─────────────────────────────────────────────────────────────────────────────

/// Ordered matches for one document: line-ascending, then start-ascending.
///
/// `previews` parallels `spans` one-to-one and holds the (possibly
/// truncated) line text for display. Truncation is presentation only: the
/// span offsets always index the untruncated line, so navigation stays
/// correct even when the preview is cut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMatches {
    /// Document name the matches belong to
    pub name: String,
    /// All match spans, in scan order
    pub spans: Vec<MatchSpan>,
    /// Display preview per span
    pub previews: Vec<String>,
}

impl DocumentMatches {
    /// Total number of matches in this document.
    pub fn total(&self) -> usize {
        self.spans.len()
    }

    /// Whether the document had any matches at all.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scanning
// ─────────────────────────────────────────────────────────────────────────────

/// Scan one document's content for every match of `matcher`.
///
/// Content is split on line-feed boundaries; a trailing line with no
/// terminator is still scanned. A document with zero matches yields an
/// empty [`DocumentMatches`], not an error.
pub fn scan(
    name: &str,
    content: &str,
    matcher: &Matcher,
    preview_max_len: usize,
) -> DocumentMatches {
    let mut spans = Vec::new();
    let mut previews = Vec::new();

    for (line_idx, line) in content.split('\n').enumerate() {
        let line_matches = find_in_line(matcher, line_idx + 1, line);
        if line_matches.is_empty() {
            continue;
        }
        for span in line_matches {
            spans.push(span);
            previews.push(truncate_with_ellipsis(line, preview_max_len));
        }
    }

    DocumentMatches {
        name: name.to_string(),
        spans,
        previews,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
