//! Search session: match set ownership and navigation
//!
//! Owns the current match set, whether it came from a single-document find
//! or a cross-document search, plus the navigation cursor. Next/previous
//! wrap around the ordered match list; the cursor resets whenever the
//! underlying match set is recomputed or cleared.
//!
//! Stale offsets are never revalidated: the owner must call [`SearchSession::clear`]
//! on every content change and re-run the search on demand.

use crate::error::Result;
use crate::search::index::{scan, DocumentMatches, DEFAULT_PREVIEW_MAX_LEN};
use crate::search::line::MatchSpan;
use crate::search::{Matcher, SearchOptions};
use log::debug;

// ─────────────────────────────────────────────────────────────────────────────
// Match Location
// ─────────────────────────────────────────────────────────────────────────────

/// A navigable match position: which document, which line, which range.
///
/// Returned by cursor movement so the caller can forward a reveal/select
/// request to the text-buffer collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchLocation {
    /// Name of the document containing the match
    pub name: String,
    /// The match span within that document
    pub span: MatchSpan,
}

// ─────────────────────────────────────────────────────────────────────────────
// Search Session
// ─────────────────────────────────────────────────────────────────────────────

/// Owns the current match set and its navigation cursor.
#[derive(Debug)]
pub struct SearchSession {
    /// Per-document results, input document order, zero-match documents omitted
    per_document: Vec<DocumentMatches>,
    /// Flattened match list the cursor indexes into
    flat: Vec<MatchLocation>,
    /// Current match index; `None` means "no match"
    cursor: Option<usize>,
    /// Byte budget for result previews
    preview_max_len: usize,
}

impl SearchSession {
    /// Create a session with the default preview budget.
    pub fn new() -> Self {
        Self::with_preview_len(DEFAULT_PREVIEW_MAX_LEN)
    }

    /// Create a session with a custom preview budget.
    pub fn with_preview_len(preview_max_len: usize) -> Self {
        Self {
            per_document: Vec::new(),
            flat: Vec::new(),
            cursor: None,
            preview_max_len,
        }
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {

    // ─────────────────────────────────────────────────────────────────────────
    // Starting Searches
    // ─────────────────────────────────────────────────────────────────────────

    /// Find all matches in a single document (in-editor find).
    ///
    /// Replaces any previous match set. The cursor initializes to the first
    /// match when one exists. Returns the match count; a compile failure is
    /// an `Err`, kept distinct from `Ok(0)` ("could not search" vs "nothing
    /// found").
    pub fn start_find(
        &mut self,
        name: &str,
        content: &str,
        term: &str,
        options: SearchOptions,
    ) -> Result<usize> {
        let matcher = Matcher::compile(term, options)?;
        let result = scan(name, content, &matcher, self.preview_max_len);
        debug!("find '{}' in '{}': {} match(es)", term, name, result.total());

        self.install(if result.is_empty() { vec![] } else { vec![result] });
        Ok(self.flat.len())
    }

    /// Search across several documents, aggregated per document.
    ///
    /// Documents with zero matches are omitted from the result list; the
    /// others keep the input order (open order), not match-count order.
    /// Returns the total match count across all documents.
    pub fn start_search<'a>(
        &mut self,
        documents: impl IntoIterator<Item = (&'a str, &'a str)>,
        term: &str,
        options: SearchOptions,
    ) -> Result<usize> {
        let matcher = Matcher::compile(term, options)?;

        let mut per_document = Vec::new();
        for (name, content) in documents {
            let result = scan(name, content, &matcher, self.preview_max_len);
            if !result.is_empty() {
                per_document.push(result);
            }
        }
        debug!(
            "search '{}': {} document(s) with matches",
            term,
            per_document.len()
        );

        self.install(per_document);
        Ok(self.flat.len())
    }

    /// Replace the match set and reset the cursor.
    fn install(&mut self, per_document: Vec<DocumentMatches>) {
        self.flat = per_document
            .iter()
            .flat_map(|doc| {
                doc.spans.iter().map(|span| MatchLocation {
                    name: doc.name.clone(),
                    span: *span,
                })
            })
            .collect();
        self.per_document = per_document;
        self.cursor = if self.flat.is_empty() { None } else { Some(0) };
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    /// Advance to the next match, wrapping from last to first.
    ///
    /// No-op returning `None` when there are zero matches.
    pub fn next(&mut self) -> Option<MatchLocation> {
        if self.flat.is_empty() {
            return None;
        }
        let next = match self.cursor {
            Some(i) => (i + 1) % self.flat.len(),
            None => 0,
        };
        self.cursor = Some(next);
        Some(self.flat[next].clone())
    }

    /// Step back to the previous match, wrapping from first to last.
    pub fn previous(&mut self) -> Option<MatchLocation> {
        if self.flat.is_empty() {
            return None;
        }
        let prev = match self.cursor {
            Some(0) | None => self.flat.len() - 1,
            Some(i) => i - 1,
        };
        self.cursor = Some(prev);
        Some(self.flat[prev].clone())
    }

    /// The match the cursor currently points at.
    pub fn current(&self) -> Option<MatchLocation> {
        self.cursor.map(|i| self.flat[i].clone())
    }

    /// Cursor position as an index into the ordered match list.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Discard all matches and reset the cursor to "no match".
    ///
    /// Must be invoked whenever the underlying content changes.
    pub fn clear(&mut self) {
        self.per_document.clear();
        self.flat.clear();
        self.cursor = None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Per-document results of the last search, input order preserved.
    pub fn per_document(&self) -> &[DocumentMatches] {
        &self.per_document
    }

    /// Total match count across all documents.
    pub fn match_count(&self) -> usize {
        self.flat.len()
    }

    /// Whether the session currently holds any matches.
    pub fn has_matches(&self) -> bool {
        !self.flat.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
