//! Built-in analytic position provider.

use chrono::{DateTime, Datelike, Utc};
use vrat_time::{jd_tt, jd_utc, julian_centuries};

use crate::error::EphemerisError;
use crate::moon::lunar_geometry;
use crate::nutation::{mean_obliquity_deg, nutation};
use crate::sun::{aberration_deg, solar_geometry};
use crate::util::normalize_360;
use crate::{ApparentPosition, Body, PositionProvider};

/// Kilometres per astronomical unit (IAU 2012).
pub const AU_KM: f64 = 149_597_870.7;

/// Ephemeris configuration used at startup time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EphemerisConfig {
    /// First civil year the provider will serve.
    pub valid_from_year: i32,
    /// Last civil year the provider will serve (inclusive).
    pub valid_to_year: i32,
    /// Evaluate the series in TT (UTC + ΔT) rather than directly in UTC.
    pub apply_delta_t: bool,
}

impl Default for EphemerisConfig {
    fn default() -> Self {
        Self {
            valid_from_year: 1900,
            valid_to_year: 2100,
            apply_delta_t: true,
        }
    }
}

impl EphemerisConfig {
    fn validate(&self) -> Result<(), EphemerisError> {
        if self.valid_from_year > self.valid_to_year {
            return Err(EphemerisError::InvalidConfig(
                "valid_from_year must not exceed valid_to_year",
            ));
        }
        if self.valid_from_year < 1000 || self.valid_to_year > 3000 {
            return Err(EphemerisError::InvalidConfig(
                "validity window must stay within 1000..=3000",
            ));
        }
        Ok(())
    }
}

/// Truncated-series Sun/Moon ephemeris.
///
/// Stateless apart from its configuration, so one instance can be shared
/// across threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct AnalyticEphemeris {
    config: EphemerisConfig,
}

impl AnalyticEphemeris {
    /// Create a provider after validating the configuration.
    pub fn new(config: EphemerisConfig) -> Result<Self, EphemerisError> {
        config.validate()?;
        tracing::debug!(
            from = config.valid_from_year,
            to = config.valid_to_year,
            delta_t = config.apply_delta_t,
            "analytic ephemeris ready"
        );
        Ok(Self { config })
    }

    /// Provider with [`EphemerisConfig::default`].
    pub fn with_default() -> Self {
        Self {
            config: EphemerisConfig::default(),
        }
    }

    pub fn config(&self) -> &EphemerisConfig {
        &self.config
    }

    /// Julian centuries (dynamical time) for an instant, after the range check.
    fn centuries(&self, at: &DateTime<Utc>) -> Result<f64, EphemerisError> {
        let year = at.year();
        if year < self.config.valid_from_year || year > self.config.valid_to_year {
            return Err(EphemerisError::OutOfRange {
                year,
                from: self.config.valid_from_year,
                to: self.config.valid_to_year,
            });
        }
        let jd = if self.config.apply_delta_t {
            jd_tt(at)
        } else {
            jd_utc(at)
        };
        Ok(julian_centuries(jd))
    }
}

impl PositionProvider for AnalyticEphemeris {
    fn apparent_position(
        &self,
        body: Body,
        at: &DateTime<Utc>,
    ) -> Result<ApparentPosition, EphemerisError> {
        let t = self.centuries(at)?;
        let dpsi = nutation(t).dpsi_deg();
        let pos = match body {
            Body::Sun => {
                let g = solar_geometry(t);
                ApparentPosition {
                    longitude_deg: normalize_360(
                        g.true_longitude_deg + dpsi + aberration_deg(g.radius_au),
                    ),
                    latitude_deg: 0.0,
                    distance_km: g.radius_au * AU_KM,
                }
            }
            Body::Moon => {
                let g = lunar_geometry(t);
                ApparentPosition {
                    longitude_deg: normalize_360(g.longitude_deg + dpsi),
                    latitude_deg: g.latitude_deg,
                    distance_km: g.distance_km,
                }
            }
        };
        Ok(pos)
    }

    fn obliquity_deg(&self, at: &DateTime<Utc>) -> Result<f64, EphemerisError> {
        let t = self.centuries(at)?;
        Ok(mean_obliquity_deg(t) + nutation(t).deps_arcsec / 3600.0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn rejects_inverted_window() {
        let config = EphemerisConfig {
            valid_from_year: 2100,
            valid_to_year: 1900,
            apply_delta_t: true,
        };
        assert!(matches!(
            AnalyticEphemeris::new(config),
            Err(EphemerisError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_window_beyond_series_validity() {
        let config = EphemerisConfig {
            valid_from_year: 1900,
            valid_to_year: 5000,
            apply_delta_t: true,
        };
        assert!(AnalyticEphemeris::new(config).is_err());
    }

    #[test]
    fn out_of_range_epoch_is_reported() {
        let eph = AnalyticEphemeris::with_default();
        let at = Utc.with_ymd_and_hms(2150, 1, 1, 0, 0, 0).unwrap();
        let err = eph.apparent_position(Body::Sun, &at).unwrap_err();
        assert_eq!(
            err,
            EphemerisError::OutOfRange {
                year: 2150,
                from: 1900,
                to: 2100
            }
        );
    }

    #[test]
    fn sun_near_equinox_point_in_march() {
        let eph = AnalyticEphemeris::with_default();
        // March equinox 2025: 2025-03-20 09:01 UTC
        let at = Utc.with_ymd_and_hms(2025, 3, 20, 9, 1, 0).unwrap();
        let sun = eph.apparent_position(Body::Sun, &at).unwrap();
        let off = crate::util::wrap_180(sun.longitude_deg);
        assert!(off.abs() < 0.02, "λ☉ = {}", sun.longitude_deg);
    }

    #[test]
    fn sun_distance_about_one_au() {
        let eph = AnalyticEphemeris::with_default();
        let at = Utc.with_ymd_and_hms(2025, 7, 4, 0, 0, 0).unwrap();
        let sun = eph.apparent_position(Body::Sun, &at).unwrap();
        assert!((sun.distance_km / AU_KM - 1.0167).abs() < 0.001);
    }

    #[test]
    fn obliquity_near_23_44() {
        let eph = AnalyticEphemeris::with_default();
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let eps = eph.obliquity_deg(&at).unwrap();
        assert!((eps - 23.44).abs() < 0.01, "ε = {eps}");
    }
}
