//! Search engine: pattern compilation, match extraction, and navigation
//!
//! Layered leaf-first: [`pattern`] compiles a term into a [`Matcher`],
//! [`line`] extracts spans from one line, [`index`] scans a whole document,
//! and [`session`] owns the resulting match set and its cursor.

pub mod index;
pub mod line;
pub mod pattern;
pub mod session;

pub use index::{scan, DocumentMatches, DEFAULT_PREVIEW_MAX_LEN};
pub use line::{find_in_line, MatchSpan};
pub use pattern::{Matcher, SearchOptions};
pub use session::{MatchLocation, SearchSession};
