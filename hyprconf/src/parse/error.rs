//! Failures recorded in a parse result.

use thiserror::Error;

use crate::engine::{SourceError, SourceLocation};
use crate::value::CoercionError;

/// A data-domain failure found while parsing.
///
/// Unlike [`crate::schema::SchemaError`], these are collected into a
/// [`super::ParseResult`] according to the parse mode instead of being
/// returned immediately.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// A token did not fit the declared kind of its entry.
    #[error("Config error in {location}: invalid value for {path}: {source}")]
    Coercion {
        /// Where the assignment was written.
        location: SourceLocation,
        /// Path as written, including any special key.
        path: String,
        /// Underlying coercion failure.
        #[source]
        source: CoercionError,
    },

    /// No entry, special category or handler accepts the path.
    #[error("Config error in {location}: config option <{path}> does not exist.")]
    UnknownKey {
        /// Where the assignment was written.
        location: SourceLocation,
        /// Unrecognised path.
        path: String,
    },

    /// The text engine could not open or scan the source.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A required special category saw no key during the parse.
    #[error("Config error: special category '{category}' requires at least one keyed block")]
    MissingRequired {
        /// Category that was never opened.
        category: String,
    },

    /// A special category value was written without a key to attach it to.
    #[error("Config error in {location}: special category '{category}' is missing its key")]
    SpecialKeyMissing {
        /// Where the failure was detected.
        location: SourceLocation,
        /// Category lacking a key.
        category: String,
    },

    /// A keyword handler rejected its value.
    #[error("Config error in {location}: {keyword}: {message}")]
    Handler {
        /// Where the keyword was written.
        location: SourceLocation,
        /// Keyword the handler is registered for.
        keyword: String,
        /// Message returned by the handler.
        message: String,
    },
}
