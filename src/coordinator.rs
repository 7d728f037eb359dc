//! Editor session coordinator
//!
//! Composes the document session and the search session, and is the only
//! component with an external boundary: save requests go out to the
//! persistence collaborator, confirmation questions go out to the prompt
//! collaborator, and navigation results come back as [`MatchLocation`]s for
//! the text-buffer collaborator to reveal.
//!
//! The coordinator guarantees the save/discard/cancel sequencing around
//! closing or switching away from a dirty document; the policy decision
//! itself is delegated to the prompt. Nothing here panics across the
//! boundary: every failure is a returned [`Error`].

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::project::{DocumentSource, FileStore};
use crate::search::{DocumentMatches, MatchLocation, Matcher, SearchOptions, SearchSession};
use crate::session::DocumentSession;
use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Collaborator Interfaces
// ─────────────────────────────────────────────────────────────────────────────

/// Confirmation-prompt collaborator: one yes/no question at a time.
///
/// Used only for the close/switch-with-unsaved-changes policy; the
/// coordinator never shows UI itself.
pub trait ConfirmPrompt {
    fn confirm(&self, message: &str) -> bool;
}

// ─────────────────────────────────────────────────────────────────────────────
// Save Requests
// ─────────────────────────────────────────────────────────────────────────────

/// A save handed to an asynchronous persistence collaborator.
///
/// Produced by [`EditorSessionCoordinator::begin_save`]; the collaborator
/// reports back through [`EditorSessionCoordinator::complete_save`]. At most
/// one request per document may be outstanding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    /// Document the request belongs to
    pub name: String,
    /// Destination path
    pub path: PathBuf,
    /// Content snapshot to persist
    pub content: String,
}

/// How a close or switch against a dirty document was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The document was clean; no decision was needed
    Clean,
    /// The user chose to save first, and the save succeeded
    Saved,
    /// The user chose to proceed without saving
    Discarded,
    /// The user declined both; the operation did not happen
    Cancelled,
}

// ─────────────────────────────────────────────────────────────────────────────
// Coordinator
// ─────────────────────────────────────────────────────────────────────────────

/// Mediates between the document session, the search session, and the
/// external collaborators.
#[derive(Debug)]
pub struct EditorSessionCoordinator {
    session: DocumentSession,
    search: SearchSession,
    settings: Settings,
    /// Documents with an outstanding save request
    in_flight: BTreeSet<String>,
}

impl Default for EditorSessionCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSessionCoordinator {
    /// Create a coordinator with default settings.
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// Create a coordinator honoring the given settings.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            session: DocumentSession::new(),
            search: SearchSession::with_preview_len(settings.preview_max_len),
            settings,
            in_flight: BTreeSet::new(),
        }
    }

    /// Read access to the document session.
    pub fn session(&self) -> &DocumentSession {
        &self.session
    }

    /// The settings in effect.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Opening Documents
    // ─────────────────────────────────────────────────────────────────────────

    /// Open a document with content already in hand.
    pub fn open_document(&mut self, name: &str, content: String, origin_path: Option<PathBuf>) {
        self.session.open(name, content, origin_path);
    }

    /// Load a document through the persistence collaborator and open it.
    ///
    /// If `name` is already open this only re-activates it; nothing is
    /// loaded and in-memory edits survive.
    pub fn open_path(&mut self, name: &str, path: &Path, store: &dyn FileStore) -> Result<()> {
        if self.session.get(name).is_some() {
            return self.session.set_active(name);
        }
        let content = store.load(path).map_err(|e| Error::io(path, e))?;
        self.session.open(name, content, Some(path.to_path_buf()));
        Ok(())
    }

    /// Create a fresh, never-persisted document.
    pub fn new_document(&mut self, name: &str) -> Result<()> {
        self.session.new_document(name)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Content Changes
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply a content-change event from the text-buffer collaborator.
    ///
    /// Any held search results are discarded: their offsets describe content
    /// that no longer exists, and the design recomputes rather than patches.
    pub fn notify_content_changed(&mut self, name: &str, text: String) -> Result<()> {
        self.session.on_content_changed(name, text)?;
        self.search.clear();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Saving (two-phase, single in-flight request per document)
    // ─────────────────────────────────────────────────────────────────────────

    /// Start a save, handing a content snapshot to the collaborator.
    ///
    /// # Errors
    ///
    /// [`Error::SaveInFlight`] when a request for this document is already
    /// outstanding. A second request is rejected rather than queued, so
    /// out-of-order writes cannot be committed silently; the caller retries
    /// after completion. [`Error::NoDestination`] when the document has no
    /// origin path.
    pub fn begin_save(&mut self, name: &str) -> Result<SaveRequest> {
        if self.in_flight.contains(name) {
            return Err(Error::SaveInFlight {
                name: name.to_string(),
            });
        }
        let doc = self.session.get(name).ok_or_else(|| Error::NotOpen {
            name: name.to_string(),
        })?;
        let path = doc
            .origin_path()
            .map(PathBuf::from)
            .ok_or_else(|| Error::NoDestination {
                name: name.to_string(),
            })?;

        let request = SaveRequest {
            name: name.to_string(),
            path,
            content: doc.content().to_string(),
        };
        self.in_flight.insert(name.to_string());
        debug!("Save started for '{}'", name);
        Ok(request)
    }

    /// Record the outcome of a save request.
    ///
    /// Success clears the document's dirty state; failure leaves it dirty
    /// and surfaces the collaborator's message as an [`Error::Io`]. The
    /// in-flight slot is freed either way, so a retry is a plain repeat of
    /// [`EditorSessionCoordinator::begin_save`].
    pub fn complete_save(
        &mut self,
        name: &str,
        outcome: std::result::Result<(), String>,
    ) -> Result<()> {
        if !self.in_flight.remove(name) {
            warn!("Save completion for '{}' with no request in flight", name);
        }
        match outcome {
            Ok(()) => {
                self.session.mark_saved(name)?;
                info!("Save completed for '{}'", name);
                Ok(())
            }
            Err(message) => {
                let path = self
                    .session
                    .get(name)
                    .and_then(|d| d.origin_path())
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(name));
                Err(Error::io(
                    path,
                    io::Error::new(io::ErrorKind::Other, message),
                ))
            }
        }
    }

    /// Save synchronously through the store (both phases in one call).
    pub fn save(&mut self, name: &str, store: &dyn FileStore) -> Result<()> {
        let request = self.begin_save(name)?;
        let outcome = store
            .save(&request.path, &request.content)
            .map_err(|e| e.to_string());
        self.complete_save(name, outcome)
    }

    /// Save to a new destination, adopting it as the origin path.
    pub fn save_as(&mut self, name: &str, path: PathBuf, store: &dyn FileStore) -> Result<()> {
        if self.in_flight.contains(name) {
            return Err(Error::SaveInFlight {
                name: name.to_string(),
            });
        }
        self.session.save_as(name, path, store)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Close / Switch Policy
    // ─────────────────────────────────────────────────────────────────────────

    /// Close a document, resolving the pending-changes policy first.
    ///
    /// A dirty document is never removed without a decision: the prompt is
    /// offered save, then discard; declining both cancels the close. A save
    /// failure (including [`Error::NoDestination`]) aborts the close and is
    /// returned for display.
    pub fn close_document(
        &mut self,
        name: &str,
        store: &dyn FileStore,
        prompt: &dyn ConfirmPrompt,
    ) -> Result<Resolution> {
        if self.in_flight.contains(name) {
            return Err(Error::SaveInFlight {
                name: name.to_string(),
            });
        }

        let resolution = match self.resolve_pending_changes(name, "closing", store, prompt)? {
            Resolution::Cancelled => return Ok(Resolution::Cancelled),
            resolved => resolved,
        };

        self.session.close(name)?;
        self.search.clear();
        Ok(resolution)
    }

    /// Switch the active document, resolving pending changes on the one
    /// being left first.
    ///
    /// A cancel leaves the active document unchanged. A discard proceeds
    /// without saving; the edits stay in memory and the document stays
    /// dirty.
    pub fn switch_to(
        &mut self,
        name: &str,
        store: &dyn FileStore,
        prompt: &dyn ConfirmPrompt,
    ) -> Result<Resolution> {
        if self.session.get(name).is_none() {
            return Err(Error::NotOpen {
                name: name.to_string(),
            });
        }

        let leaving = match self.session.active() {
            Some(doc) if doc.name() != name && doc.is_dirty() => doc.name().to_string(),
            _ => {
                self.session.set_active(name)?;
                self.search.clear();
                return Ok(Resolution::Clean);
            }
        };

        let resolution = match self.resolve_pending_changes(&leaving, "switching", store, prompt)? {
            Resolution::Cancelled => return Ok(Resolution::Cancelled),
            resolved => resolved,
        };

        self.session.set_active(name)?;
        self.search.clear();
        Ok(resolution)
    }

    /// Run the save-or-discard-or-cancel sequence for one dirty document.
    ///
    /// Returns `Clean` without prompting when the document has no unsaved
    /// changes.
    fn resolve_pending_changes(
        &mut self,
        name: &str,
        verb: &str,
        store: &dyn FileStore,
        prompt: &dyn ConfirmPrompt,
    ) -> Result<Resolution> {
        if !self.session.is_dirty(name)? {
            return Ok(Resolution::Clean);
        }

        let title = self.session.get(name).map(|d| d.title()).unwrap_or_default();
        if prompt.confirm(&format!(
            "'{}' has unsaved changes. Save before {}?",
            title, verb
        )) {
            self.save(name, store)?;
            return Ok(Resolution::Saved);
        }

        if !self.settings.confirm_before_discard
            || prompt.confirm(&format!("Discard unsaved changes to '{}'?", name))
        {
            info!("Discarding unsaved changes to '{}'", name);
            return Ok(Resolution::Discarded);
        }

        Ok(Resolution::Cancelled)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────

    /// Find in the active document (in-editor find).
    pub fn find_in_active(&mut self, term: &str, options: SearchOptions) -> Result<usize> {
        let doc = self.session.active().ok_or(Error::NoActiveDocument)?;
        self.search.start_find(doc.name(), doc.content(), term, options)
    }

    /// Search every open document, aggregated per document in open order.
    pub fn search_open_documents(&mut self, term: &str, options: SearchOptions) -> Result<usize> {
        let documents = self
            .session
            .documents()
            .iter()
            .map(|d| (d.name(), d.content()));
        self.search.start_search(documents, term, options)
    }

    /// Search candidates supplied by the directory/tree collaborator,
    /// loading each through the store without opening it.
    ///
    /// The term is validated before any file is touched. Unreadable
    /// candidates are skipped with a warning, matching the load policy for
    /// project files that moved or changed permissions mid-session.
    pub fn search_project(
        &mut self,
        sources: &[DocumentSource],
        term: &str,
        options: SearchOptions,
        store: &dyn FileStore,
    ) -> Result<usize> {
        // Fail fast on a bad pattern before doing any I/O
        Matcher::compile(term, options)?;

        let mut loaded = Vec::with_capacity(sources.len());
        for source in sources {
            match store.load(&source.path) {
                Ok(content) => loaded.push((source.name.clone(), content)),
                Err(e) => warn!("Skipping '{}': {}", source.path.display(), e),
            }
        }

        self.search.start_search(
            loaded.iter().map(|(n, c)| (n.as_str(), c.as_str())),
            term,
            options,
        )
    }

    /// Per-document results of the last search.
    pub fn matches(&self) -> &[DocumentMatches] {
        self.search.per_document()
    }

    /// Total match count of the last search.
    pub fn match_count(&self) -> usize {
        self.search.match_count()
    }

    /// Advance to the next match; the returned location is for the caller to
    /// forward to the text-buffer collaborator's reveal.
    pub fn next_match(&mut self) -> Option<MatchLocation> {
        self.search.next()
    }

    /// Step back to the previous match.
    pub fn previous_match(&mut self) -> Option<MatchLocation> {
        self.search.previous()
    }

    /// The match the navigation cursor points at.
    pub fn current_match(&self) -> Option<MatchLocation> {
        self.search.current()
    }

    /// Drop the held match set.
    pub fn clear_search(&mut self) {
        self.search.clear();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore {
        files: RefCell<HashMap<PathBuf, String>>,
        fail_saves: bool,
    }

    impl MemoryStore {
        fn with_file(path: &str, content: &str) -> Self {
            let store = Self::default();
            store
                .files
                .borrow_mut()
                .insert(PathBuf::from(path), content.to_string());
            store
        }
    }

    impl FileStore for MemoryStore {
        fn load(&self, path: &Path) -> io::Result<String> {
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }

        fn save(&self, path: &Path, content: &str) -> io::Result<()> {
            if self.fail_saves {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
            }
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }
    }

    /// Prompt double answering from a script, recording every question.
    struct ScriptedPrompt {
        answers: RefCell<Vec<bool>>,
        asked: RefCell<Vec<String>>,
    }

    impl ScriptedPrompt {
        fn answering(answers: &[bool]) -> Self {
            let mut script: Vec<bool> = answers.to_vec();
            script.reverse();
            Self {
                answers: RefCell::new(script),
                asked: RefCell::new(Vec::new()),
            }
        }
    }

    impl ConfirmPrompt for ScriptedPrompt {
        fn confirm(&self, message: &str) -> bool {
            self.asked.borrow_mut().push(message.to_string());
            self.answers
                .borrow_mut()
                .pop()
                .expect("prompt asked more questions than scripted")
        }
    }

    fn dirty_coordinator(name: &str, path: Option<&str>) -> EditorSessionCoordinator {
        let mut coordinator = EditorSessionCoordinator::new();
        coordinator.open_document(name, "original".into(), path.map(PathBuf::from));
        coordinator
            .notify_content_changed(name, "edited".into())
            .unwrap();
        coordinator
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Open / Content Change
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_open_path_loads_through_store() {
        let store = MemoryStore::with_file("/p/a.txt", "from disk");
        let mut coordinator = EditorSessionCoordinator::new();

        coordinator.open_path("a.txt", Path::new("/p/a.txt"), &store).unwrap();
        let doc = coordinator.session().active().unwrap();
        assert_eq!(doc.content(), "from disk");
        assert_eq!(doc.origin_path(), Some(Path::new("/p/a.txt")));
    }

    #[test]
    fn test_open_path_missing_file_reports_io() {
        let store = MemoryStore::default();
        let mut coordinator = EditorSessionCoordinator::new();
        let err = coordinator
            .open_path("a.txt", Path::new("/p/a.txt"), &store)
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(coordinator.session().is_empty());
    }

    #[test]
    fn test_reopen_path_keeps_edits_without_reloading() {
        let store = MemoryStore::with_file("/p/a.txt", "v1");
        let mut coordinator = EditorSessionCoordinator::new();
        coordinator.open_path("a.txt", Path::new("/p/a.txt"), &store).unwrap();
        coordinator.notify_content_changed("a.txt", "edited".into()).unwrap();

        coordinator.open_path("a.txt", Path::new("/p/a.txt"), &store).unwrap();
        assert_eq!(coordinator.session().active().unwrap().content(), "edited");
    }

    #[test]
    fn test_content_change_clears_search() {
        let mut coordinator = EditorSessionCoordinator::new();
        coordinator.open_document("a.txt", "foo bar foo".into(), None);
        coordinator
            .find_in_active("foo", SearchOptions::default())
            .unwrap();
        assert_eq!(coordinator.match_count(), 2);

        coordinator
            .notify_content_changed("a.txt", "rewritten".into())
            .unwrap();
        assert_eq!(coordinator.match_count(), 0);
        assert!(coordinator.current_match().is_none());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Two-Phase Save
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_begin_save_snapshots_content() {
        let mut coordinator = dirty_coordinator("a.txt", Some("/p/a.txt"));
        let request = coordinator.begin_save("a.txt").unwrap();
        assert_eq!(request.name, "a.txt");
        assert_eq!(request.path, PathBuf::from("/p/a.txt"));
        assert_eq!(request.content, "edited");
    }

    #[test]
    fn test_second_begin_save_rejected() {
        let mut coordinator = dirty_coordinator("a.txt", Some("/p/a.txt"));
        coordinator.begin_save("a.txt").unwrap();

        let err = coordinator.begin_save("a.txt").unwrap_err();
        assert!(matches!(err, Error::SaveInFlight { name } if name == "a.txt"));
    }

    #[test]
    fn test_complete_save_success_clears_dirty_and_slot() {
        let mut coordinator = dirty_coordinator("a.txt", Some("/p/a.txt"));
        coordinator.begin_save("a.txt").unwrap();
        coordinator.complete_save("a.txt", Ok(())).unwrap();

        assert!(!coordinator.session().is_dirty("a.txt").unwrap());
        // Slot is free again
        coordinator.notify_content_changed("a.txt", "again".into()).unwrap();
        coordinator.begin_save("a.txt").unwrap();
    }

    #[test]
    fn test_complete_save_failure_leaves_dirty() {
        let mut coordinator = dirty_coordinator("a.txt", Some("/p/a.txt"));
        coordinator.begin_save("a.txt").unwrap();

        let err = coordinator
            .complete_save("a.txt", Err("disk full".to_string()))
            .unwrap_err();
        match err {
            Error::Io { path, source } => {
                assert_eq!(path, PathBuf::from("/p/a.txt"));
                assert!(source.to_string().contains("disk full"));
            }
            other => panic!("expected Io, got {:?}", other),
        }
        assert!(coordinator.session().is_dirty("a.txt").unwrap());
        // Retry is a plain repeat
        coordinator.begin_save("a.txt").unwrap();
    }

    #[test]
    fn test_begin_save_without_destination() {
        let mut coordinator = dirty_coordinator("a.txt", None);
        let err = coordinator.begin_save("a.txt").unwrap_err();
        assert!(matches!(err, Error::NoDestination { .. }));
    }

    #[test]
    fn test_save_as_sets_destination() {
        let store = MemoryStore::default();
        let mut coordinator = dirty_coordinator("a.txt", None);

        coordinator
            .save_as("a.txt", PathBuf::from("/p/a.txt"), &store)
            .unwrap();
        assert!(!coordinator.session().is_dirty("a.txt").unwrap());
        assert_eq!(
            store.files.borrow().get(Path::new("/p/a.txt")).unwrap(),
            "edited"
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Close Policy
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_close_clean_document_needs_no_prompt() {
        let store = MemoryStore::default();
        let prompt = ScriptedPrompt::answering(&[]);
        let mut coordinator = EditorSessionCoordinator::new();
        coordinator.open_document("a.txt", "text".into(), None);

        let resolution = coordinator.close_document("a.txt", &store, &prompt).unwrap();
        assert_eq!(resolution, Resolution::Clean);
        assert!(coordinator.session().is_empty());
        assert!(prompt.asked.borrow().is_empty());
    }

    #[test]
    fn test_close_dirty_save_choice() {
        let store = MemoryStore::default();
        let prompt = ScriptedPrompt::answering(&[true]);
        let mut coordinator = dirty_coordinator("a.txt", Some("/p/a.txt"));

        let resolution = coordinator.close_document("a.txt", &store, &prompt).unwrap();
        assert_eq!(resolution, Resolution::Saved);
        assert!(coordinator.session().is_empty());
        assert_eq!(
            store.files.borrow().get(Path::new("/p/a.txt")).unwrap(),
            "edited"
        );
    }

    #[test]
    fn test_close_dirty_discard_choice() {
        let store = MemoryStore::default();
        let prompt = ScriptedPrompt::answering(&[false, true]);
        let mut coordinator = dirty_coordinator("a.txt", Some("/p/a.txt"));

        let resolution = coordinator.close_document("a.txt", &store, &prompt).unwrap();
        assert_eq!(resolution, Resolution::Discarded);
        assert!(coordinator.session().is_empty());
        assert!(store.files.borrow().is_empty());
    }

    #[test]
    fn test_coordinator_blocks_close_of_dirty_doc() {
        // Declining both save and discard must leave the document open
        let store = MemoryStore::default();
        let prompt = ScriptedPrompt::answering(&[false, false]);
        let mut coordinator = dirty_coordinator("a.txt", Some("/p/a.txt"));

        let resolution = coordinator.close_document("a.txt", &store, &prompt).unwrap();
        assert_eq!(resolution, Resolution::Cancelled);
        assert_eq!(coordinator.session().len(), 1);
        assert!(coordinator.session().is_dirty("a.txt").unwrap());
    }

    #[test]
    fn test_close_save_failure_aborts_close() {
        let store = MemoryStore {
            fail_saves: true,
            ..Default::default()
        };
        let prompt = ScriptedPrompt::answering(&[true]);
        let mut coordinator = dirty_coordinator("a.txt", Some("/ro/a.txt"));

        let err = coordinator.close_document("a.txt", &store, &prompt).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert_eq!(coordinator.session().len(), 1);
        assert!(coordinator.session().is_dirty("a.txt").unwrap());
    }

    #[test]
    fn test_close_no_destination_aborts_close() {
        let store = MemoryStore::default();
        let prompt = ScriptedPrompt::answering(&[true]);
        let mut coordinator = dirty_coordinator("a.txt", None);

        let err = coordinator.close_document("a.txt", &store, &prompt).unwrap_err();
        assert!(matches!(err, Error::NoDestination { .. }));
        assert_eq!(coordinator.session().len(), 1);
    }

    #[test]
    fn test_close_without_discard_confirmation_setting() {
        let store = MemoryStore::default();
        let prompt = ScriptedPrompt::answering(&[false]);
        let mut coordinator = EditorSessionCoordinator::with_settings(Settings {
            confirm_before_discard: false,
            ..Default::default()
        });
        coordinator.open_document("a.txt", "orig".into(), None);
        coordinator.notify_content_changed("a.txt", "edited".into()).unwrap();

        // Declining the save is enough: discard needs no second question
        let resolution = coordinator.close_document("a.txt", &store, &prompt).unwrap();
        assert_eq!(resolution, Resolution::Discarded);
        assert_eq!(prompt.asked.borrow().len(), 1);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Switch Policy
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_switch_between_clean_documents() {
        let store = MemoryStore::default();
        let prompt = ScriptedPrompt::answering(&[]);
        let mut coordinator = EditorSessionCoordinator::new();
        coordinator.open_document("a.txt", "aaa".into(), None);
        coordinator.open_document("b.txt", "bbb".into(), None);

        let resolution = coordinator.switch_to("a.txt", &store, &prompt).unwrap();
        assert_eq!(resolution, Resolution::Clean);
        assert_eq!(coordinator.session().active().unwrap().name(), "a.txt");
    }

    #[test]
    fn test_switch_away_from_dirty_cancel_stays() {
        let store = MemoryStore::default();
        let prompt = ScriptedPrompt::answering(&[false, false]);
        let mut coordinator = EditorSessionCoordinator::new();
        coordinator.open_document("a.txt", "aaa".into(), None);
        coordinator.open_document("b.txt", "bbb".into(), None);
        coordinator.notify_content_changed("b.txt", "edited".into()).unwrap();

        let resolution = coordinator.switch_to("a.txt", &store, &prompt).unwrap();
        assert_eq!(resolution, Resolution::Cancelled);
        assert_eq!(coordinator.session().active().unwrap().name(), "b.txt");
    }

    #[test]
    fn test_switch_away_from_dirty_save_choice() {
        let store = MemoryStore::default();
        let prompt = ScriptedPrompt::answering(&[true]);
        let mut coordinator = EditorSessionCoordinator::new();
        coordinator.open_document("a.txt", "aaa".into(), None);
        coordinator.open_document("b.txt", "orig".into(), Some(PathBuf::from("/p/b.txt")));
        coordinator.notify_content_changed("b.txt", "edited".into()).unwrap();

        let resolution = coordinator.switch_to("a.txt", &store, &prompt).unwrap();
        assert_eq!(resolution, Resolution::Saved);
        assert_eq!(coordinator.session().active().unwrap().name(), "a.txt");
        assert!(!coordinator.session().is_dirty("b.txt").unwrap());
    }

    #[test]
    fn test_switch_away_discard_keeps_edits_in_memory() {
        let store = MemoryStore::default();
        let prompt = ScriptedPrompt::answering(&[false, true]);
        let mut coordinator = EditorSessionCoordinator::new();
        coordinator.open_document("a.txt", "aaa".into(), None);
        coordinator.open_document("b.txt", "orig".into(), Some(PathBuf::from("/p/b.txt")));
        coordinator.notify_content_changed("b.txt", "edited".into()).unwrap();

        let resolution = coordinator.switch_to("a.txt", &store, &prompt).unwrap();
        assert_eq!(resolution, Resolution::Discarded);
        let left = coordinator.session().get("b.txt").unwrap();
        assert_eq!(left.content(), "edited");
        assert!(left.is_dirty());
    }

    #[test]
    fn test_switch_to_unopened_name() {
        let store = MemoryStore::default();
        let prompt = ScriptedPrompt::answering(&[]);
        let mut coordinator = EditorSessionCoordinator::new();
        coordinator.open_document("a.txt", "aaa".into(), None);

        let err = coordinator.switch_to("ghost.txt", &store, &prompt).unwrap_err();
        assert!(matches!(err, Error::NotOpen { .. }));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search Orchestration
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_find_in_active_requires_open_document() {
        let mut coordinator = EditorSessionCoordinator::new();
        let err = coordinator
            .find_in_active("x", SearchOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::NoActiveDocument));
    }

    #[test]
    fn test_search_open_documents_in_open_order() {
        let mut coordinator = EditorSessionCoordinator::new();
        coordinator.open_document("one.txt", "hit".into(), None);
        coordinator.open_document("two.txt", "miss".into(), None);
        coordinator.open_document("three.txt", "hit hit".into(), None);

        let total = coordinator
            .search_open_documents("hit", SearchOptions::default())
            .unwrap();
        assert_eq!(total, 3);
        let names: Vec<&str> = coordinator.matches().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["one.txt", "three.txt"]);
    }

    #[test]
    fn test_search_project_skips_unreadable_sources() {
        let store = MemoryStore::with_file("/p/ok.txt", "needle here");
        let sources = vec![
            DocumentSource {
                name: "ok.txt".into(),
                path: PathBuf::from("/p/ok.txt"),
            },
            DocumentSource {
                name: "gone.txt".into(),
                path: PathBuf::from("/p/gone.txt"),
            },
        ];

        let mut coordinator = EditorSessionCoordinator::new();
        let total = coordinator
            .search_project(&sources, "needle", SearchOptions::default(), &store)
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(coordinator.matches()[0].name, "ok.txt");
        // Nothing was opened in the session
        assert!(coordinator.session().is_empty());
    }

    #[test]
    fn test_search_project_rejects_bad_pattern_before_io() {
        let store = MemoryStore::default();
        let sources = vec![DocumentSource {
            name: "x".into(),
            path: PathBuf::from("/p/x"),
        }];
        let mut coordinator = EditorSessionCoordinator::new();

        let err = coordinator
            .search_project(
                &sources,
                "[bad",
                SearchOptions {
                    use_regex: true,
                    ..Default::default()
                },
                &store,
            )
            .unwrap_err();
        assert!(matches!(err, Error::Pattern { .. }));
    }

    #[test]
    fn test_navigation_returns_locations_for_reveal() {
        let mut coordinator = EditorSessionCoordinator::new();
        coordinator.open_document("a.txt", "foo\nbar\nfoo".into(), None);
        coordinator.find_in_active("foo", SearchOptions::default()).unwrap();

        let current = coordinator.current_match().unwrap();
        assert_eq!((current.name.as_str(), current.span.line), ("a.txt", 1));

        let next = coordinator.next_match().unwrap();
        assert_eq!(next.span.line, 3);

        let wrapped = coordinator.next_match().unwrap();
        assert_eq!(wrapped.span.line, 1);
    }
}
