//! Contract between the value engine and the text engine that tokenises
//! configuration source.
//!
//! The text engine owns the grammar: comments, variables, blocks and file
//! inclusion. It pushes events into an [`EventSink`]; the sink decides what
//! each assignment means. Any sink handler may return
//! [`ControlFlow::Break`] to stop the traversal early, which is how
//! single-error parsing skips the rest of a source.
//!
//! [`LineEngine`] is the built-in implementation. Hosts with their own
//! tokenizer implement [`TextEngine`] instead.

mod color;
mod error;
mod lexer;
mod line;
mod source;

use std::fmt;
use std::ops::ControlFlow;

use camino::{Utf8Path, Utf8PathBuf};

use crate::value::RawToken;

pub use error::SourceError;
pub(crate) use color::parse_color;
pub(crate) use lexer::{Line, lex_line, split_keyed_path, strip_comment};
pub use line::LineEngine;

/// Position of an event within configuration source.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourceLocation {
    /// File path, or `<stream>` for in-memory sources.
    pub origin: String,
    /// One-based line number.
    pub line: usize,
}

impl SourceLocation {
    /// Build a location.
    #[must_use]
    pub fn new(origin: impl Into<String>, line: usize) -> Self {
        Self {
            origin: origin.into(),
            line,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file {} at line {}", self.origin, self.line)
    }
}

/// Reference to configuration source, by path or by value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SourceRef {
    /// Source stored in a file.
    Path(Utf8PathBuf),
    /// Source supplied directly as text.
    Stream(String),
}

/// Opened configuration source.
///
/// The content is read completely when the handle is created, so no
/// operating-system resource outlives [`TextEngine::open`].
#[derive(Clone, Debug)]
pub struct SourceHandle {
    origin: String,
    canonical: Option<Utf8PathBuf>,
    text: String,
}

impl SourceHandle {
    /// Wrap in-memory source text.
    #[must_use]
    pub fn stream(text: impl Into<String>) -> Self {
        Self {
            origin: String::from(STREAM_ORIGIN),
            canonical: None,
            text: text.into(),
        }
    }

    /// Wrap source text read from `canonical`.
    #[must_use]
    pub fn file(canonical: Utf8PathBuf, text: String) -> Self {
        Self {
            origin: canonical.to_string(),
            canonical: Some(canonical),
            text,
        }
    }

    /// Name used in diagnostics.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Canonical path of a file-backed source.
    #[must_use]
    pub fn canonical_path(&self) -> Option<&Utf8Path> {
        self.canonical.as_deref()
    }

    /// Directory containing a file-backed source.
    #[must_use]
    pub fn directory(&self) -> Option<&Utf8Path> {
        self.canonical.as_deref().and_then(Utf8Path::parent)
    }

    /// Source text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Origin recorded for in-memory sources.
pub const STREAM_ORIGIN: &str = "<stream>";

/// A single `key = value` assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    /// Colon-joined path from the root category, without special keys.
    pub path: String,
    /// Special-category key in effect, from `name[key]` syntax.
    pub key: Option<String>,
    /// Value after variable substitution.
    pub token: RawToken,
    /// Where the assignment was written.
    pub location: SourceLocation,
}

/// Receiver of text engine events.
pub trait EventSink {
    /// Called once per assignment.
    fn on_assignment(&mut self, assignment: Assignment) -> ControlFlow<()>;

    /// Called when a `name {` block opens. `path` is colon-joined from the
    /// root category.
    fn on_category_enter(&mut self, path: &str, location: &SourceLocation) -> ControlFlow<()>;

    /// Called when the innermost block closes.
    fn on_category_exit(&mut self, path: &str, location: &SourceLocation) -> ControlFlow<()>;

    /// Called before [`EventSink::on_category_enter`] when a `name[key] {`
    /// block opens.
    fn on_special_key(
        &mut self,
        category: &str,
        key: &str,
        location: &SourceLocation,
    ) -> ControlFlow<()>;

    /// Called for structural failures detected by the engine. The sink only
    /// records them.
    fn on_engine_error(&mut self, error: SourceError) -> ControlFlow<()>;
}

/// Tokeniser and evaluator for configuration source.
pub trait TextEngine {
    /// Open `source` for scanning.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::NotFound`] when a file does not exist and
    /// [`SourceError::Read`] for any other read failure.
    fn open(&self, source: &SourceRef) -> Result<SourceHandle, SourceError>;

    /// Push the events of `handle` into `sink`.
    ///
    /// Returns [`ControlFlow::Break`] when the sink stopped the traversal.
    fn scan(&mut self, handle: SourceHandle, sink: &mut dyn EventSink) -> ControlFlow<()>;

    /// Rebase relative `source =` includes found in later scans.
    fn change_root_path(&mut self, root: &Utf8Path);
}

#[cfg(test)]
mod tests;
