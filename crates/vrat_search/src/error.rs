//! Error types for the observance engine.

use thiserror::Error;
use vrat_base::VedicError;
use vrat_ephem::EphemerisError;

use crate::masa_map::MonthMapError;

/// Errors that abort an observance computation.
///
/// Per-day conditions (undefined sunrise, missing moonrise) never surface
/// here; rules skip those days and continue.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// The position backend cannot serve the request. Fatal, not retried.
    #[error("ephemeris unavailable: {0}")]
    EphemerisUnavailable(#[from] EphemerisError),
    /// Non-recoverable error from the calendar primitives.
    #[error("calendar primitive: {0}")]
    Vedic(VedicError),
    /// Lunar month naming failed.
    #[error("month map: {0}")]
    MonthMap(#[from] MonthMapError),
    /// Festival key not present in the rule registry.
    #[error("unknown festival key {0:?}")]
    UnknownFestival(String),
    /// Unknown tradition name.
    #[error("unknown tradition {0:?} (expected smartha or vaishnava)")]
    UnknownTradition(String),
    /// Viewer timezone label that does not parse.
    #[error("invalid timezone label {0:?}")]
    InvalidTimeZoneLabel(String),
    /// `from` year after `to` year.
    #[error("invalid year range {from}..={to}")]
    InvalidYearRange { from: i32, to: i32 },
}

impl From<VedicError> for SearchError {
    fn from(e: VedicError) -> Self {
        match e {
            VedicError::Ephemeris(inner) => Self::EphemerisUnavailable(inner),
            other => Self::Vedic(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ephemeris_failures_become_unavailable() {
        let e: SearchError = VedicError::Ephemeris(EphemerisError::InvalidConfig("x")).into();
        assert!(matches!(e, SearchError::EphemerisUnavailable(_)));
    }

    #[test]
    fn other_vedic_errors_are_wrapped() {
        let e: SearchError = VedicError::InvalidLocation("lat").into();
        assert_eq!(e, SearchError::Vedic(VedicError::InvalidLocation("lat")));
    }
}
