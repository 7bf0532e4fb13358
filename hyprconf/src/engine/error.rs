//! Failures reported while opening or scanning configuration source.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

use super::SourceLocation;

/// Errors raised by a text engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    /// The configuration file does not exist.
    #[error("config file {path} does not exist")]
    NotFound {
        /// Path that was requested.
        path: Utf8PathBuf,
    },

    /// The configuration file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that was requested.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Structural failure inside the source, such as an unterminated block
    /// or a missing include.
    #[error("Config error in {location}: {message}")]
    Engine {
        /// Where the failure was detected.
        location: SourceLocation,
        /// Engine-provided description.
        message: String,
    },
}

impl SourceError {
    /// Classify an I/O failure for `path`.
    pub(crate) fn from_io(path: Utf8PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Read { path, source }
        }
    }

    /// Build an engine failure.
    pub(crate) fn engine(location: SourceLocation, message: impl Into<String>) -> Self {
        Self::Engine {
            location,
            message: message.into(),
        }
    }

    /// Returns `true` for a missing file.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
