//! Search pattern compilation
//!
//! Turns a raw search term plus option flags into a compiled, reusable
//! [`Matcher`]. Escaping and word-boundary anchoring rules live here and
//! nowhere else, so in-editor find and cross-document search cannot drift
//! apart in how they interpret a term.

use crate::error::{Error, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Search Options
// ─────────────────────────────────────────────────────────────────────────────

/// Option flags for a search. Pure value, no identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Whether matching distinguishes letter case
    pub case_sensitive: bool,
    /// Whether matches must fall on word boundaries (literal mode only)
    pub whole_word: bool,
    /// Whether the term is a regular expression rather than literal text
    pub use_regex: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Matcher
// ─────────────────────────────────────────────────────────────────────────────

/// A compiled search pattern, reusable across lines and documents.
///
/// Always finds every non-overlapping occurrence, never a single match.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    /// Compile a search term under the given options.
    ///
    /// In literal mode every regex metacharacter in `term` is escaped; the
    /// whole-word anchors are applied after escaping. In regex mode the term
    /// is used verbatim and `whole_word` is ignored (a user-supplied regex is
    /// trusted as-is).
    ///
    /// # Errors
    ///
    /// [`Error::EmptyPattern`] for an empty term, [`Error::Pattern`] when a
    /// regex-mode term fails to parse. Both are reportable, never fatal.
    pub fn compile(term: &str, options: SearchOptions) -> Result<Self> {
        if term.is_empty() {
            return Err(Error::EmptyPattern);
        }

        let pattern = if options.use_regex {
            term.to_string()
        } else {
            let escaped = regex::escape(term);
            if options.whole_word {
                format!(r"\b{}\b", escaped)
            } else {
                escaped
            }
        };

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(!options.case_sensitive)
            .build()
            .map_err(|e| Error::Pattern {
                message: e.to_string(),
            })?;

        Ok(Self { regex })
    }

    /// Iterate over all non-overlapping matches in `haystack`.
    pub fn find_iter<'m, 'h>(&'m self, haystack: &'h str) -> regex::Matches<'m, 'h> {
        self.regex.find_iter(haystack)
    }

    /// The compiled pattern text (for logging).
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
