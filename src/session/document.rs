//! The document data model
//!
//! One named in-memory text buffer. Dirty state is derived by comparing the
//! current content against the last loaded/saved snapshot, so it cannot
//! desynchronize from the content itself; editing back to the snapshot makes
//! the document clean again.

use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Document
// ─────────────────────────────────────────────────────────────────────────────

/// A single open document: name, content, origin path, saved snapshot.
///
/// Content only mutates through the owning session's operations, never
/// directly.
#[derive(Debug, Clone)]
pub struct Document {
    /// Identity, unique within the session
    name: String,
    /// Authoritative cached content
    content: String,
    /// Content as of the last successful load or save
    saved_content: String,
    /// Where the document persists to; `None` means never persisted
    origin_path: Option<PathBuf>,
}

impl Document {
    pub(crate) fn new(name: String, content: String, origin_path: Option<PathBuf>) -> Self {
        Self {
            name,
            saved_content: content.clone(),
            content,
            origin_path,
        }
    }

    /// The document's name (its identity within the session).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full current text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The persistence destination, if the document has ever been saved or
    /// was loaded from disk.
    pub fn origin_path(&self) -> Option<&Path> {
        self.origin_path.as_deref()
    }

    /// Whether the in-memory content has diverged from the last snapshot.
    pub fn is_dirty(&self) -> bool {
        self.content != self.saved_content
    }

    /// Display label: the name, with a `*` suffix while dirty.
    ///
    /// The marker is derived from the dirty state here; callers never encode
    /// it back into the name.
    pub fn title(&self) -> String {
        if self.is_dirty() {
            format!("{}*", self.name)
        } else {
            self.name.clone()
        }
    }

    pub(crate) fn set_content(&mut self, content: String) {
        self.content = content;
    }

    /// Record the current content as the saved snapshot (clears dirty).
    pub(crate) fn mark_saved(&mut self) {
        self.saved_content = self.content.clone();
    }

    pub(crate) fn set_origin_path(&mut self, path: PathBuf) {
        self.origin_path = Some(path);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
