//! Bridges between chrono instants and Julian Dates.
//!
//! The engine passes `DateTime<Utc>` across crate boundaries and converts to
//! JD (UTC or TT) only at the point where a formula needs it.

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::delta_t::{decimal_year, delta_t_seconds};
use crate::error::TimeError;
use crate::julian::{SECONDS_PER_DAY, calendar_to_jd, julian_centuries};

/// Julian Date of the Unix epoch (1970-Jan-01 00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Julian Date (UTC scale) of an instant.
pub fn jd_utc(at: &DateTime<Utc>) -> f64 {
    let secs = at.timestamp() as f64 + f64::from(at.timestamp_subsec_nanos()) * 1e-9;
    UNIX_EPOCH_JD + secs / SECONDS_PER_DAY
}

/// Julian Ephemeris Date (TT scale) of an instant, using the ΔT fit.
pub fn jd_tt(at: &DateTime<Utc>) -> f64 {
    let dt = delta_t_seconds(decimal_year(at.year(), at.month()));
    jd_utc(at) + dt / SECONDS_PER_DAY
}

/// Instant from a Julian Date on the UTC scale, rounded to the millisecond.
pub fn utc_from_jd(jd: f64) -> Result<DateTime<Utc>, TimeError> {
    let millis = ((jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1000.0).round();
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
        return Err(TimeError::OutOfRange(jd));
    }
    DateTime::from_timestamp_millis(millis as i64).ok_or(TimeError::OutOfRange(jd))
}

/// Julian centuries since J2000 computed from the civil calendar fields.
///
/// Uses the Gregorian→JD formula on the UTC date and time of day directly,
/// without a time-scale correction. This is the argument the Lahiri linear
/// ayanamsha approximation is defined against.
pub fn calendar_centuries(at: &DateTime<Utc>) -> f64 {
    let day_frac = f64::from(at.day())
        + (f64::from(at.hour())
            + (f64::from(at.minute()) + f64::from(at.second()) / 60.0) / 60.0)
            / 24.0;
    julian_centuries(calendar_to_jd(at.year(), at.month(), day_frac))
}
