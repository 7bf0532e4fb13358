//! Boundary error enum.

use std::sync::Arc;

use thiserror::Error;

use super::aggregate::AggregatedErrors;
use crate::parse::ParseError;
use crate::schema::SchemaError;

/// Errors returned by the strict entry points.
///
/// Schema misuse is reported as [`HyprconfError::Schema`]. Parse failures
/// keep the order in which they were found: one failure is returned as
/// [`HyprconfError::Parse`], several as [`HyprconfError::Aggregate`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HyprconfError {
    /// The schema API was misused.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A single parse failure.
    #[error(transparent)]
    Parse(Arc<ParseError>),

    /// Several parse failures, in order.
    #[error("multiple configuration errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}
