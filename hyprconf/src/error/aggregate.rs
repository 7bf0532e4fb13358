//! Ordered list of parse failures returned by a collect-all parse.

use std::{error::Error, fmt, sync::Arc};

use super::HyprconfError;

/// Parse failures reported together, in the order they were found.
///
/// An aggregate is only built for a failed parse, so it is never empty.
///
/// # Examples
///
/// ```
/// use hyprconf::{Config, ConfigOptions, HyprconfError};
///
/// let options = ConfigOptions {
///     path_is_stream: true,
///     throw_all_errors: true,
///     ..ConfigOptions::default()
/// };
/// let mut config = Config::new("gaps = wide\nborder = 2\n", options);
/// config.add_value("gaps", 0_i64)?;
/// config.commence();
///
/// let Err(HyprconfError::Aggregate(failures)) = config.parse()?.into_result() else {
///     panic!("two failures expected");
/// };
/// assert_eq!(failures.len(), 2);
/// assert!(failures.to_string().starts_with("1: Config error in file <stream> at line 1"));
/// # Ok::<_, hyprconf::SchemaError>(())
/// ```
#[derive(Debug, Default)]
pub struct AggregatedErrors(Vec<Arc<HyprconfError>>);

#[expect(
    clippy::len_without_is_empty,
    reason = "aggregates are only built from at least one failure"
)]
impl AggregatedErrors {
    /// Wrap failures that are already in report order.
    #[must_use]
    pub const fn new(errors: Vec<Arc<HyprconfError>>) -> Self {
        Self(errors)
    }

    /// Borrow each failure in order.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = &HyprconfError> {
        self.0.iter().map(Arc::as_ref)
    }

    /// Number of failures.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }
}

/// One numbered failure per line.
impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut number = 0_usize;
        for failure in &self.0 {
            if number > 0 {
                writeln!(f)?;
            }
            number = number.saturating_add(1);
            write!(f, "{number}: {failure}")?;
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}

impl<'a> IntoIterator for &'a AggregatedErrors {
    type Item = &'a HyprconfError;
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, Arc<HyprconfError>>,
        fn(&'a Arc<HyprconfError>) -> &'a HyprconfError,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().map(Arc::as_ref)
    }
}

impl IntoIterator for AggregatedErrors {
    type Item = Arc<HyprconfError>;
    type IntoIter = std::vec::IntoIter<Arc<HyprconfError>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
