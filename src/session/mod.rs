//! Document session: the open/active/dirty state machine
//!
//! The authoritative mapping of open documents to content, dirty, and
//! origin-path state. Per document name the lifecycle is
//! `Unopened → Open(clean) ⇄ Open(dirty) → Closed`. At most one document is
//! active at any time, and exactly one whenever the session is non-empty.
//!
//! Content mutates only through [`DocumentSession::open`]'s initial load,
//! [`DocumentSession::on_content_changed`], and save snapshotting, so dirty
//! tracking cannot desynchronize from content. The search engine reads from
//! this session and never writes to it.

pub mod document;

pub use document::Document;

use crate::error::{Error, Result};
use crate::project::FileStore;
use log::{debug, info};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Document Session
// ─────────────────────────────────────────────────────────────────────────────

/// Owns all open documents, in open order, plus the active-document marker.
#[derive(Debug, Default)]
pub struct DocumentSession {
    /// Open documents, oldest first (open order)
    documents: Vec<Document>,
    /// Index of the active document; `None` only when the session is empty
    active: Option<usize>,
}

impl DocumentSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Opening and Activation
    // ─────────────────────────────────────────────────────────────────────────

    /// Open a document and make it active.
    ///
    /// If `name` is already open this only re-activates it: re-opening never
    /// clobbers in-memory edits, and the supplied content is ignored.
    pub fn open(&mut self, name: &str, content: String, origin_path: Option<PathBuf>) {
        if let Some(idx) = self.index_of(name) {
            debug!("'{}' already open, re-activating", name);
            self.active = Some(idx);
            return;
        }

        info!("Opened '{}'", name);
        self.documents
            .push(Document::new(name.to_string(), content, origin_path));
        self.active = Some(self.documents.len() - 1);
    }

    /// Create a fresh, never-persisted document and make it active.
    ///
    /// # Errors
    ///
    /// [`Error::AlreadyOpen`] if a document with this name exists; unlike
    /// [`DocumentSession::open`], a new file under a taken name is a caller
    /// mistake rather than a re-activation.
    pub fn new_document(&mut self, name: &str) -> Result<()> {
        if self.index_of(name).is_some() {
            return Err(Error::AlreadyOpen {
                name: name.to_string(),
            });
        }
        self.open(name, String::new(), None);
        Ok(())
    }

    /// Make an open document the active one.
    pub fn set_active(&mut self, name: &str) -> Result<()> {
        let idx = self.index_of(name).ok_or_else(|| Error::NotOpen {
            name: name.to_string(),
        })?;
        self.active = Some(idx);
        debug!("Active document: '{}'", name);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Content Changes
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply a content-change event from the text-buffer collaborator.
    ///
    /// Valid only for the active document; an edit event for any other name
    /// is surfaced as an error, never silently applied. Dirty state is
    /// derived from the snapshot, so repeated edits need no transition.
    pub fn on_content_changed(&mut self, name: &str, new_content: String) -> Result<()> {
        let idx = self.index_of(name).ok_or_else(|| Error::NotOpen {
            name: name.to_string(),
        })?;
        if self.active != Some(idx) {
            return Err(Error::NotActive {
                name: name.to_string(),
            });
        }
        self.documents[idx].set_content(new_content);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Saving
    // ─────────────────────────────────────────────────────────────────────────

    /// Persist a document through the store and clear its dirty state.
    ///
    /// # Errors
    ///
    /// [`Error::NoDestination`] when the document has no origin path (the
    /// caller must obtain one, e.g. via a "save as" prompt);
    /// [`Error::Io`] on store failure, with document state left unchanged so
    /// a retry is safe.
    pub fn save(&mut self, name: &str, store: &dyn FileStore) -> Result<()> {
        let idx = self.index_of(name).ok_or_else(|| Error::NotOpen {
            name: name.to_string(),
        })?;
        let path = self.documents[idx]
            .origin_path()
            .map(PathBuf::from)
            .ok_or_else(|| Error::NoDestination {
                name: name.to_string(),
            })?;

        store
            .save(&path, self.documents[idx].content())
            .map_err(|e| Error::io(&path, e))?;

        self.documents[idx].mark_saved();
        info!("Saved '{}' to {}", name, path.display());
        Ok(())
    }

    /// Persist a document to a new origin path ("save as"), then treat that
    /// path as the document's destination from now on.
    pub fn save_as(&mut self, name: &str, path: PathBuf, store: &dyn FileStore) -> Result<()> {
        let idx = self.index_of(name).ok_or_else(|| Error::NotOpen {
            name: name.to_string(),
        })?;

        store
            .save(&path, self.documents[idx].content())
            .map_err(|e| Error::io(&path, e))?;

        self.documents[idx].set_origin_path(path);
        self.documents[idx].mark_saved();
        Ok(())
    }

    /// Record a completed external save without re-persisting (used by the
    /// coordinator's two-phase save).
    pub(crate) fn mark_saved(&mut self, name: &str) -> Result<()> {
        let idx = self.index_of(name).ok_or_else(|| Error::NotOpen {
            name: name.to_string(),
        })?;
        self.documents[idx].mark_saved();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Closing
    // ─────────────────────────────────────────────────────────────────────────

    /// Remove a document from the session, returning it.
    ///
    /// The pending-changes policy is the coordinator's responsibility; this
    /// removes unconditionally. If the closed document was active, the first
    /// remaining document in open order becomes active, or the session is
    /// left empty.
    pub fn close(&mut self, name: &str) -> Result<Document> {
        let idx = self.index_of(name).ok_or_else(|| Error::NotOpen {
            name: name.to_string(),
        })?;
        let removed = self.documents.remove(idx);

        self.active = if self.documents.is_empty() {
            None
        } else {
            match self.active {
                Some(a) if a == idx => Some(0),
                Some(a) if a > idx => Some(a - 1),
                other => other,
            }
        };

        info!("Closed '{}'", name);
        Ok(removed)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// All open documents, in open order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// The active document, if the session is non-empty.
    pub fn active(&self) -> Option<&Document> {
        self.active.map(|i| &self.documents[i])
    }

    /// Look up an open document by name.
    pub fn get(&self, name: &str) -> Option<&Document> {
        self.index_of(name).map(|i| &self.documents[i])
    }

    /// Whether a specific open document has unsaved changes.
    pub fn is_dirty(&self, name: &str) -> Result<bool> {
        self.get(name)
            .map(|d| d.is_dirty())
            .ok_or_else(|| Error::NotOpen {
                name: name.to_string(),
            })
    }

    /// Whether any open document has unsaved changes.
    pub fn has_unsaved_changes(&self) -> bool {
        self.documents.iter().any(|d| d.is_dirty())
    }

    /// Number of open documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether no documents are open.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.documents.iter().position(|d| d.name() == name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
