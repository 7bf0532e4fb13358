//! Conversions from crate-internal error types into `HyprconfError`.

use std::sync::Arc;

use super::HyprconfError;
use crate::engine::SourceError;
use crate::parse::ParseError;

impl From<ParseError> for HyprconfError {
    fn from(error: ParseError) -> Self {
        Self::Parse(Arc::new(error))
    }
}

impl From<Arc<ParseError>> for HyprconfError {
    fn from(error: Arc<ParseError>) -> Self {
        Self::Parse(error)
    }
}

/// Opening a source outside a parse, as the one-shot helpers do, reports the
/// failure the same way a parse would.
impl From<SourceError> for HyprconfError {
    fn from(error: SourceError) -> Self {
        Self::from(ParseError::Source(error))
    }
}
