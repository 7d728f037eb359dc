//! Persistence and project-tree collaborators
//!
//! The session core never owns an on-disk format; it talks to a
//! [`FileStore`] for load/save round-trips and accepts an opaque list of
//! `(name, path)` candidates for "search in project". This module provides
//! the disk-backed implementations of both.

use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

// ─────────────────────────────────────────────────────────────────────────────
// Persistence Collaborator
// ─────────────────────────────────────────────────────────────────────────────

/// The persistence boundary: a load/save round-trip per path.
///
/// Errors are reported verbatim to the user and never retried by the core;
/// retry, if any, is a user-initiated repeat of the same call.
pub trait FileStore {
    /// Read the full content at `path`.
    fn load(&self, path: &Path) -> io::Result<String>;

    /// Write `content` to `path`, replacing what was there.
    fn save(&self, path: &Path, content: &str) -> io::Result<()>;
}

/// [`FileStore`] backed by the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskStore;

impl FileStore for DiskStore {
    fn load(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn save(&self, path: &Path, content: &str) -> io::Result<()> {
        fs::write(path, content)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Project Sources
// ─────────────────────────────────────────────────────────────────────────────

/// One candidate for cross-project search: a display name plus the path to
/// load it from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSource {
    /// Name presented in results (path relative to the project root)
    pub name: String,
    /// Absolute or root-relative path for the store
    pub path: PathBuf,
}

/// Extensions considered text for project search.
const TEXT_EXTENSIONS: &[&str] = &[
    "md", "markdown", "txt", "rs", "toml", "json", "yaml", "yml", "js", "ts", "jsx", "tsx",
    "html", "css", "scss", "py", "go", "java", "c", "cpp", "h", "hpp", "sh", "xml", "svg",
];

/// List the searchable text files under `root`, sorted by file name.
///
/// Hidden entries (names starting with `.`) are skipped, directories and
/// all; files whose extension is not in the text allowlist are skipped too.
/// Names are the path relative to `root`, so they stay unique even when
/// file names repeat across directories.
pub fn collect_sources(root: &Path) -> Result<Vec<DocumentSource>> {
    let mut sources = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "walk error"));
            Error::io(path, source)
        })?;

        if !entry.file_type().is_file() || !is_text_file(entry.path()) {
            continue;
        }

        let name = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .into_owned();
        sources.push(DocumentSource {
            name,
            path: entry.into_path(),
        });
    }

    debug!("Collected {} source file(s) under {}", sources.len(), root.display());
    Ok(sources)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            TEXT_EXTENSIONS.iter().any(|known| *known == ext)
        })
        .unwrap_or(false)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
