//! Constructors and aggregation helpers for `HyprconfError`.

use std::sync::Arc;

use super::{AggregatedErrors, HyprconfError};
use crate::parse::ParseError;

impl HyprconfError {
    /// Tries to build a [`HyprconfError`] from an iterator of errors.
    ///
    /// The iterator is consumed eagerly. It returns:
    /// * `None` when no errors are supplied;
    /// * the inner error when a single [`Arc`] is uniquely owned;
    /// * [`Self::Aggregate`] containing that single [`Arc`] when the error is
    ///   already shared; and
    /// * [`Self::Aggregate`] combining every error for two or more inputs.
    #[must_use]
    pub fn try_aggregate<I, E>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        let mut arcs: Vec<Arc<Self>> = errors.into_iter().map(Into::into).collect();
        if arcs.is_empty() {
            return None;
        }
        Some(if arcs.len() == 1 {
            let last = arcs.pop()?;
            match Arc::try_unwrap(last) {
                Ok(err) => err,
                Err(shared) => Self::Aggregate(Box::new(AggregatedErrors::new(vec![shared]))),
            }
        } else {
            Self::Aggregate(Box::new(AggregatedErrors::new(arcs)))
        })
    }

    /// Parse failures carried by this error, in order.
    ///
    /// Schema errors carry none.
    #[must_use]
    pub fn parse_errors(&self) -> Vec<&ParseError> {
        match self {
            Self::Schema(_) => Vec::new(),
            Self::Parse(error) => vec![error.as_ref()],
            Self::Aggregate(errors) => errors.iter().flat_map(Self::parse_errors).collect(),
        }
    }
}
