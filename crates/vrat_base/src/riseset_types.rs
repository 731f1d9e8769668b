//! Types for sunrise/sunset and moonrise calculations.

use chrono::{DateTime, TimeDelta};
use chrono_tz::Tz;

use crate::error::VedicError;

/// Mean Earth radius in meters (IAU nominal, for geometric dip).
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Geographic location on Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    /// Geodetic latitude in degrees, north positive. Range: [-90, 90].
    pub latitude_deg: f64,
    /// Geodetic longitude in degrees, east positive. Range: [-180, 180].
    pub longitude_deg: f64,
    /// Altitude above mean sea level in meters.
    pub altitude_m: f64,
}

impl GeoLocation {
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_m,
        }
    }

    /// Reject coordinates outside the valid ranges.
    pub fn validate(&self) -> Result<(), VedicError> {
        if !self.latitude_deg.is_finite() || self.latitude_deg.abs() > 90.0 {
            return Err(VedicError::InvalidLocation("latitude must be within [-90, 90]"));
        }
        if !self.longitude_deg.is_finite() || self.longitude_deg.abs() > 180.0 {
            return Err(VedicError::InvalidLocation(
                "longitude must be within [-180, 180]",
            ));
        }
        if !self.altitude_m.is_finite() {
            return Err(VedicError::InvalidLocation("altitude must be finite"));
        }
        Ok(())
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn longitude_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }
}

/// Parameters for rise/set computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiseSetConfig {
    /// Atmospheric refraction at the horizon in arcminutes. Default: 34.0.
    pub refraction_arcmin: f64,
    /// Solar angular semi-diameter in arcminutes. Default: 16.0.
    pub semidiameter_arcmin: f64,
    /// Apply geometric dip `sqrt(2h/R)` for observer altitude. Default: true.
    pub altitude_correction: bool,
}

impl Default for RiseSetConfig {
    fn default() -> Self {
        Self {
            refraction_arcmin: 34.0,
            semidiameter_arcmin: 16.0,
            altitude_correction: true,
        }
    }
}

impl RiseSetConfig {
    /// Geometric dip of the horizon in degrees for an observer altitude.
    pub fn dip_deg(&self, altitude_m: f64) -> f64 {
        if self.altitude_correction && altitude_m > 0.0 {
            (2.0 * altitude_m / EARTH_RADIUS_M).sqrt().to_degrees()
        } else {
            0.0
        }
    }

    /// Altitude of the Sun's centre at sunrise/sunset in degrees (negative).
    ///
    /// `h0 = −(refraction + semidiameter)/60 − dip`
    pub fn sun_target_altitude_deg(&self, altitude_m: f64) -> f64 {
        -(self.refraction_arcmin + self.semidiameter_arcmin) / 60.0 - self.dip_deg(altitude_m)
    }

    /// Altitude of the Moon's centre at moonrise in degrees.
    ///
    /// `h0 = 0.7275·π − refraction − dip`, with π the horizontal parallax.
    pub fn moon_target_altitude_deg(&self, parallax_deg: f64, altitude_m: f64) -> f64 {
        0.7275 * parallax_deg - self.refraction_arcmin / 60.0 - self.dip_deg(altitude_m)
    }
}

/// Outcome of a single rise or set search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiseSetResult {
    /// Event occurs at the given Julian Date (UTC).
    Event { jd_utc: f64 },
    /// Sun never rises during this solar day (polar night).
    NeverRises,
    /// Sun never sets during this solar day (midnight sun).
    NeverSets,
}

/// Local sunrise and sunset for one civil date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunTimes {
    pub sunrise: DateTime<Tz>,
    pub sunset: DateTime<Tz>,
}

impl SunTimes {
    /// Daylight duration; may be non-positive around DST anomalies.
    pub fn daylight(&self) -> TimeDelta {
        self.sunset.signed_duration_since(self.sunrise)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = RiseSetConfig::default();
        assert_eq!(c.refraction_arcmin, 34.0);
        assert_eq!(c.semidiameter_arcmin, 16.0);
        assert!(c.altitude_correction);
    }

    #[test]
    fn sun_target_at_sea_level() {
        let h0 = RiseSetConfig::default().sun_target_altitude_deg(0.0);
        assert!((h0 + 50.0 / 60.0).abs() < 1e-12, "h0 = {h0}");
    }

    #[test]
    fn dip_at_1000m_about_one_degree() {
        let c = RiseSetConfig::default();
        let dip = c.dip_deg(1000.0);
        assert!((0.9..1.2).contains(&dip), "dip = {dip}");
        let off = RiseSetConfig {
            altitude_correction: false,
            ..Default::default()
        };
        assert_eq!(off.dip_deg(1000.0), 0.0);
    }

    #[test]
    fn moon_target_is_slightly_positive() {
        let h0 = RiseSetConfig::default().moon_target_altitude_deg(0.95, 0.0);
        assert!((h0 - (0.7275 * 0.95 - 34.0 / 60.0)).abs() < 1e-12);
        assert!(h0 > 0.0);
    }

    #[test]
    fn location_validation() {
        assert!(GeoLocation::new(19.076, 72.8777, 0.0).validate().is_ok());
        assert!(GeoLocation::new(91.0, 0.0, 0.0).validate().is_err());
        assert!(GeoLocation::new(0.0, -181.0, 0.0).validate().is_err());
        assert!(GeoLocation::new(f64::NAN, 0.0, 0.0).validate().is_err());
    }
}
