//! Time-scale helpers for the vrat calendar engine.
//!
//! This crate provides:
//! - Julian Date ↔ Gregorian calendar conversions
//! - ΔT (TT − UT) from polynomial fits
//! - Greenwich/local mean sidereal time
//! - Conversions between chrono `DateTime<Utc>` and JD (UTC or TT)

pub mod delta_t;
pub mod error;
pub mod julian;
pub mod sidereal;
pub mod utc;

pub use delta_t::{decimal_year, delta_t_seconds};
pub use error::TimeError;
pub use julian::{
    DAYS_PER_CENTURY, J2000_JD, SECONDS_PER_DAY, calendar_to_jd, jd_to_calendar, julian_centuries,
};
pub use sidereal::{SIDEREAL_RATE_RAD_PER_DAY, gmst_rad, local_sidereal_time_rad};
pub use utc::{UNIX_EPOCH_JD, calendar_centuries, jd_tt, jd_utc, utc_from_jd};
