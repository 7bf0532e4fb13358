//! Outcome of a single parse invocation.

use std::sync::Arc;

use super::ParseError;
use crate::HyprconfError;

/// How failures are handled during a parse.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ParseMode {
    /// Stop at the first failure.
    #[default]
    FirstError,
    /// Record every failure and continue to the end of the source.
    CollectAll,
}

impl ParseMode {
    /// Mode selected by the `throw_all_errors` option.
    #[must_use]
    pub const fn from_collect_all(collect_all: bool) -> Self {
        if collect_all {
            Self::CollectAll
        } else {
            Self::FirstError
        }
    }
}

/// Failures recorded by one `parse`, `parse_file` or `parse_dynamic` call.
///
/// Every call produces an independent result; a failed parse leaves the
/// configuration usable for later calls.
///
/// # Examples
///
/// ```
/// use hyprconf::{Config, ConfigOptions};
///
/// let options = ConfigOptions { path_is_stream: true, ..ConfigOptions::default() };
/// let mut config = Config::new("gaps = wide", options);
/// config.add_value("gaps", 5_i64)?;
/// config.commence();
/// let result = config.parse()?;
/// assert!(result.failed());
/// assert_eq!(result.messages().len(), 1);
/// # Ok::<_, hyprconf::SchemaError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct ParseResult {
    errors: Vec<Arc<ParseError>>,
}

impl ParseResult {
    /// Whether any failure was recorded.
    #[must_use]
    pub const fn failed(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Recorded failures in the order they were found.
    #[must_use]
    pub fn errors(&self) -> &[Arc<ParseError>] {
        &self.errors
    }

    /// Rendered failure messages in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// All messages joined by newlines, or `None` on success.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.failed().then(|| self.messages().join("\n"))
    }

    pub(crate) fn push(&mut self, error: ParseError) {
        self.errors.push(Arc::new(error));
    }

    /// Convert into the strict convention, where any failure is an error.
    ///
    /// # Errors
    ///
    /// Returns the single recorded failure, or an aggregate of all of them
    /// in order.
    pub fn into_result(self) -> Result<(), HyprconfError> {
        HyprconfError::try_aggregate(self.errors.into_iter().map(HyprconfError::Parse))
            .map_or(Ok(()), Err)
    }
}
