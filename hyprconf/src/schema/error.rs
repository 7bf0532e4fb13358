//! Programmer-error conditions raised by schema and special-category calls.

use thiserror::Error;

use crate::value::CoercionError;

/// Misuse of the schema API.
///
/// These errors are returned immediately to the caller and are never
/// collected into a [`crate::ParseResult`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum SchemaError {
    /// The schema was locked by `commence()` before this registration.
    #[error("cannot register '{path}': the schema is locked")]
    AlreadyLocked {
        /// Path or category being registered.
        path: String,
    },

    /// A parse was requested before `commence()`.
    #[error("commence() must be called before parsing")]
    NotCommenced,

    /// The path already names an entry.
    #[error("config value '{path}' is already registered")]
    DuplicateEntry {
        /// Duplicated path.
        path: String,
    },

    /// The path does not name an entry.
    #[error("no such config value '{path}'")]
    NotFound {
        /// Requested path.
        path: String,
    },

    /// The path is empty or contains an empty segment.
    #[error("invalid config path '{path}'")]
    InvalidPath {
        /// Offending path.
        path: String,
    },

    /// The path would make one name both a value and a category.
    #[error("'{path}' would name both a value and a category")]
    PathConflict {
        /// Offending path.
        path: String,
    },

    /// A special category and a regular category share a name.
    #[error("special category '{category}' collides with a regular category")]
    CategoryConflict {
        /// Colliding category name.
        category: String,
    },

    /// The supplied default is not one of the four value kinds.
    #[error("unsupported default for '{path}': {found} values have no config kind")]
    UnsupportedDefault {
        /// Path being registered.
        path: String,
        /// Shape of the rejected default.
        found: &'static str,
    },

    /// No special category with this name was declared.
    #[error("no such special category '{category}'")]
    UnknownSpecialCategory {
        /// Requested category.
        category: String,
    },

    /// A special category with this name already exists.
    #[error("special category '{category}' is already declared")]
    DuplicateSpecialCategory {
        /// Duplicated category.
        category: String,
    },

    /// The special category has no instance for the key.
    #[error("special category '{category}' has no key '{key}'")]
    NoSuchKey {
        /// Special category name.
        category: String,
        /// Requested key.
        key: String,
    },

    /// The special category template has no such entry.
    #[error("special category '{category}' has no value '{entry}'")]
    NoSuchEntry {
        /// Special category name.
        category: String,
        /// Requested entry.
        entry: String,
    },
}

/// Failure to apply an assignment to a registered entry.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum AssignError {
    /// The target could not be resolved.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// The token does not fit the declared kind.
    #[error(transparent)]
    Coercion(#[from] CoercionError),
}
