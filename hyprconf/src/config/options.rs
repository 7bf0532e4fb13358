//! Options controlling how a [`super::Config`] reads its source.

use serde::{Deserialize, Serialize};

use crate::parse::ParseMode;

/// Parse behaviour for a [`super::Config`].
///
/// Every field defaults to `false`, so hosts can load the options from
/// their own configuration layer and omit what they do not need.
///
/// # Examples
///
/// ```
/// use hyprconf::ConfigOptions;
///
/// let options: ConfigOptions =
///     serde_json::from_value(serde_json::json!({"throw_all_errors": true}))?;
/// assert!(options.throw_all_errors);
/// assert!(!options.verify_only);
/// # Ok::<_, serde_json::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each flag is an independent, serialisable switch"
)]
pub struct ConfigOptions {
    /// Skip the check for required special categories that were never
    /// opened. Malformed values are still reported.
    pub verify_only: bool,
    /// Record every failure instead of stopping at the first.
    pub throw_all_errors: bool,
    /// Treat a missing main configuration file as empty.
    pub allow_missing_config: bool,
    /// The path given to [`super::Config::new`] is the configuration text
    /// itself.
    pub path_is_stream: bool,
}

impl ConfigOptions {
    /// Parse mode selected by [`ConfigOptions::throw_all_errors`].
    #[must_use]
    pub const fn mode(&self) -> ParseMode {
        ParseMode::from_collect_all(self.throw_all_errors)
    }
}
