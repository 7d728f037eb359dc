//! Centralized error handling for quire
//!
//! This module provides a unified error type that covers all error scenarios
//! in the crate: search pattern compilation, document session state,
//! persistence, and configuration.

use log::warn;
use std::fmt;
use std::io;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Custom Result Type Alias
// ─────────────────────────────────────────────────────────────────────────────

/// A specialized `Result` type for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The centralized error type for the crate.
///
/// Every variant is recoverable: the session stays usable after any of them,
/// and nothing is retried automatically.
#[derive(Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────
    // Search Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Search term was empty (rejected before reaching the matcher)
    EmptyPattern,

    /// Search pattern failed to compile (regex mode with invalid syntax)
    Pattern { message: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Document Session Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Operation on a document name with no open entry
    NotOpen { name: String },

    /// Content change reported for a document that is not active
    NotActive { name: String },

    /// A new document was requested under a name that is already open
    AlreadyOpen { name: String },

    /// Save requested for a document with no origin path ("save as" required)
    NoDestination { name: String },

    /// A save request was issued while one is already outstanding
    SaveInFlight { name: String },

    /// No document is active (the session is empty)
    NoActiveDocument,

    // ─────────────────────────────────────────────────────────────────────────
    // Persistence Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// I/O failure from the persistence collaborator
    Io { path: PathBuf, source: io::Error },

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Configuration directory not found or inaccessible
    ConfigDirNotFound,

    /// Failed to parse configuration (invalid JSON/format)
    ConfigParse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Wrap an I/O error together with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParse {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display trait implementation for user-friendly error messages
// ─────────────────────────────────────────────────────────────────────────────
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Search Errors
            Error::EmptyPattern => write!(f, "Search term is empty"),
            Error::Pattern { message } => write!(f, "Invalid search pattern: {}", message),

            // Document Session Errors
            Error::NotOpen { name } => write!(f, "'{}' is not open", name),
            Error::NotActive { name } => {
                write!(f, "'{}' is not the active document", name)
            }
            Error::AlreadyOpen { name } => write!(f, "'{}' is already open", name),
            Error::NoDestination { name } => {
                write!(f, "'{}' has no file path. Use 'Save As' instead.", name)
            }
            Error::SaveInFlight { name } => {
                write!(f, "A save for '{}' is already in progress", name)
            }
            Error::NoActiveDocument => write!(f, "No document is open"),

            // Persistence Errors
            Error::Io { path, source } => {
                write!(f, "I/O error on '{}': {}", path.display(), source)
            }

            // Configuration Errors
            Error::ConfigDirNotFound => {
                write!(f, "Configuration directory not found")
            }
            Error::ConfigParse { message, .. } => {
                write!(f, "Invalid configuration format: {}", message)
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// std::error::Error trait implementation for error chaining
// ─────────────────────────────────────────────────────────────────────────────
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            Error::ConfigParse { source, .. } => source
                .as_ref()
                .map(|s| s.as_ref() as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Graceful Degradation Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for Result to support graceful degradation.
pub trait ResultExt<T> {
    /// If the result is an error, log it at warning level and return the provided default.
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                warn!("{}: {}. Using default.", context, err);
                default
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
