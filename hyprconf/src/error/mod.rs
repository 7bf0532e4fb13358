//! Error types returned at the boundary of the crate.

mod aggregate;
mod constructors;
mod conversions;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::HyprconfError;
