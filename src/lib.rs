//! Quire - Editor Session Core
//!
//! The in-process core of an editor shell: a document session that tracks
//! which named buffers are open, which one is active, and which have unsaved
//! changes, plus a search engine that finds a term across one document, all
//! open documents, or a whole project tree, with wrap-around navigation over
//! the results.
//!
//! Everything here is synchronous and in-memory. Persistence goes through
//! the [`FileStore`] trait and confirmation questions through the
//! [`ConfirmPrompt`] trait, so a host can plug in real disk I/O and a real
//! dialog, or test doubles.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod project;
pub mod search;
pub mod session;
pub mod string_utils;

pub use config::{load_settings, save_settings, Settings};
pub use coordinator::{ConfirmPrompt, EditorSessionCoordinator, Resolution, SaveRequest};
pub use error::{Error, Result, ResultExt};
pub use project::{collect_sources, DiskStore, DocumentSource, FileStore};
pub use search::{
    DocumentMatches, MatchLocation, MatchSpan, Matcher, SearchOptions, SearchSession,
};
pub use session::{Document, DocumentSession};
