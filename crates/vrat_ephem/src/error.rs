//! Error types for the position provider.

use thiserror::Error;
use vrat_time::TimeError;

/// Errors raised while producing Sun/Moon positions.
///
/// Every variant means the ephemeris cannot serve the request; callers treat
/// them as fatal for the whole computation.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EphemerisError {
    /// Configuration rejected at construction time.
    #[error("invalid ephemeris configuration: {0}")]
    InvalidConfig(&'static str),
    /// Requested instant lies outside the configured validity window.
    #[error("epoch {year} outside ephemeris range {from}..={to}")]
    OutOfRange { year: i32, from: i32, to: i32 },
    /// The shared handle was already initialised with a different configuration.
    #[error("shared ephemeris already initialised with a different configuration")]
    AlreadyInitialized,
    /// Time conversion failed.
    #[error("time conversion: {0}")]
    Time(#[from] TimeError),
}
