//! Error types for calendar primitives.

use chrono::NaiveDate;
use thiserror::Error;
use vrat_ephem::EphemerisError;
use vrat_time::TimeError;

/// Errors from tithi, rise/set and Rahu Kaal calculations.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum VedicError {
    /// The position provider cannot serve the request.
    #[error("ephemeris error: {0}")]
    Ephemeris(#[from] EphemerisError),
    /// Time conversion failed.
    #[error("time error: {0}")]
    Time(#[from] TimeError),
    /// Sunrise or sunset does not occur on this date at this location.
    #[error("rise/set undefined on {date}: {reason}")]
    RiseSetUndefined { date: NaiveDate, reason: &'static str },
    /// Invalid geographic location parameter.
    #[error("invalid location: {0}")]
    InvalidLocation(&'static str),
    /// IANA timezone label that does not parse.
    #[error("unknown timezone label {0:?}")]
    InvalidTimeZone(String),
}

impl VedicError {
    /// Whether the error only affects a single day and can be skipped.
    pub fn is_per_day(&self) -> bool {
        matches!(self, Self::RiseSetUndefined { .. } | Self::Time(_))
    }
}
