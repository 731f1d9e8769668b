//! Error types for time-scale conversions.

use thiserror::Error;

/// Errors from Julian Date ↔ civil time conversion.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// The Julian Date cannot be represented as a chrono timestamp.
    #[error("Julian Date {0} is outside the representable civil range")]
    OutOfRange(f64),
}
