//! Apparent Sun and Moon positions for the vrat calendar engine.
//!
//! The engine only needs geocentric apparent ecliptic longitudes (and, for
//! rise/set, equatorial coordinates) of two bodies. [`PositionProvider`] is
//! the seam; [`AnalyticEphemeris`] is the built-in backend evaluating
//! truncated Meeus series, and [`global`] holds the shared handle.

use chrono::{DateTime, Utc};

pub mod engine;
pub mod error;
pub mod frames;
pub mod global;
pub mod moon;
pub mod nutation;
pub mod sun;
pub mod util;

pub use engine::{AU_KM, AnalyticEphemeris, EphemerisConfig};
pub use error::EphemerisError;
pub use frames::ecliptic_to_equatorial;
pub use util::{normalize_360, wrap_180};

/// Bodies the provider can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
}

/// Apparent geocentric ecliptic position, true equinox of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApparentPosition {
    /// Ecliptic longitude in degrees, [0, 360).
    pub longitude_deg: f64,
    /// Ecliptic latitude in degrees.
    pub latitude_deg: f64,
    /// Geocentric distance in km.
    pub distance_km: f64,
}

/// Apparent geocentric equatorial position, true equator and equinox of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialPosition {
    /// Right ascension in radians, [0, 2π).
    pub ra_rad: f64,
    /// Declination in radians.
    pub dec_rad: f64,
    /// Geocentric distance in km.
    pub distance_km: f64,
}

/// Sun and Moon apparent longitudes at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticLongitudes {
    sun_deg: f64,
    moon_deg: f64,
}

impl EclipticLongitudes {
    /// Build from raw longitudes, normalising both into [0, 360).
    pub fn new(sun_deg: f64, moon_deg: f64) -> Self {
        Self {
            sun_deg: normalize_360(sun_deg),
            moon_deg: normalize_360(moon_deg),
        }
    }

    pub fn sun_deg(&self) -> f64 {
        self.sun_deg
    }

    pub fn moon_deg(&self) -> f64 {
        self.moon_deg
    }

    /// Moon − Sun elongation in [0, 360).
    pub fn elongation_deg(&self) -> f64 {
        normalize_360(self.moon_deg - self.sun_deg)
    }
}

/// Source of apparent Sun/Moon positions.
///
/// Implementations must be deterministic: the same instant always yields the
/// same position. Errors mean the backend cannot serve the request at all.
pub trait PositionProvider: Send + Sync {
    /// Apparent ecliptic position of `body` at `at`.
    fn apparent_position(
        &self,
        body: Body,
        at: &DateTime<Utc>,
    ) -> Result<ApparentPosition, EphemerisError>;

    /// True obliquity of the ecliptic in degrees at `at`.
    fn obliquity_deg(&self, at: &DateTime<Utc>) -> Result<f64, EphemerisError>;

    /// Sun and Moon longitudes at `at`.
    fn ecliptic_longitudes(&self, at: &DateTime<Utc>) -> Result<EclipticLongitudes, EphemerisError> {
        let sun = self.apparent_position(Body::Sun, at)?;
        let moon = self.apparent_position(Body::Moon, at)?;
        Ok(EclipticLongitudes::new(sun.longitude_deg, moon.longitude_deg))
    }

    /// Apparent right ascension and declination of `body` at `at`.
    fn equatorial(
        &self,
        body: Body,
        at: &DateTime<Utc>,
    ) -> Result<EquatorialPosition, EphemerisError> {
        let pos = self.apparent_position(body, at)?;
        let eps = self.obliquity_deg(at)?;
        let (ra_rad, dec_rad) = ecliptic_to_equatorial(pos.longitude_deg, pos.latitude_deg, eps);
        Ok(EquatorialPosition {
            ra_rad,
            dec_rad,
            distance_km: pos.distance_km,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longitudes_normalised_on_construction() {
        let l = EclipticLongitudes::new(-10.0, 370.0);
        assert!((l.sun_deg() - 350.0).abs() < 1e-12);
        assert!((l.moon_deg() - 10.0).abs() < 1e-12);
        assert!((l.elongation_deg() - 20.0).abs() < 1e-12);
    }
}
