//! Extensions for turning parse outcomes into the strict convention.
//!
//! The core parse calls return `Result<ParseResult, SchemaError>`: schema
//! misuse is an error, problems in the source are data. Hosts that prefer
//! every failure to be an error use [`ParseResultExt::into_strict`] instead
//! of inspecting the [`ParseResult`] themselves.
//!
//! # Examples
//!
//! ```
//! use hyprconf::{Config, ConfigOptions, HyprconfError, ParseResultExt};
//!
//! let options = ConfigOptions { path_is_stream: true, ..ConfigOptions::default() };
//! let mut config = Config::new("gaps = 5", options);
//! config.add_value("gaps", 0_i64)?;
//! config.commence();
//! config.parse().into_strict()?;
//! # Ok::<_, HyprconfError>(())
//! ```

use crate::{HyprconfError, ParseResult, SchemaError};

/// Strict view of a parse outcome.
pub trait ParseResultExt {
    /// Convert into `Result<(), HyprconfError>`.
    ///
    /// # Errors
    ///
    /// Returns [`HyprconfError::Schema`] for schema misuse, and the recorded
    /// failures, in order, when the parse failed.
    fn into_strict(self) -> Result<(), HyprconfError>;
}

impl ParseResultExt for Result<ParseResult, SchemaError> {
    fn into_strict(self) -> Result<(), HyprconfError> {
        self?.into_result()
    }
}

impl ParseResultExt for ParseResult {
    fn into_strict(self) -> Result<(), HyprconfError> {
        self.into_result()
    }
}
