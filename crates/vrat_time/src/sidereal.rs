//! Greenwich and local mean sidereal time.
//!
//! Meeus eq. 12.4, evaluated directly at the requested instant. UT1 is
//! approximated by UTC; the sub-second difference is irrelevant for
//! rise/set times quoted to the minute.

use std::f64::consts::TAU;

use crate::julian::{J2000_JD, julian_centuries};

/// Sidereal rotation rate of the Earth in radians per solar day.
pub const SIDEREAL_RATE_RAD_PER_DAY: f64 = TAU * 1.002_737_909_35;

/// Greenwich mean sidereal time in radians, range [0, 2π).
pub fn gmst_rad(jd_ut: f64) -> f64 {
    let t = julian_centuries(jd_ut);
    let deg = 280.460_618_37 + 360.985_647_366_29 * (jd_ut - J2000_JD) + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    deg.to_radians().rem_euclid(TAU)
}

/// Local mean sidereal time in radians for an east-positive longitude.
pub fn local_sidereal_time_rad(jd_ut: f64, longitude_east_deg: f64) -> f64 {
    (gmst_rad(jd_ut) + longitude_east_deg.to_radians()).rem_euclid(TAU)
}
