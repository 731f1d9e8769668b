//! Lahiri ayanamsha approximations and sidereal solar longitude.
//!
//! Both models are named approximations for month naming and sign
//! ingress, not ephemeris-grade precession.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use vrat_ephem::{Body, EphemerisError, PositionProvider, normalize_360};
use vrat_time::{calendar_centuries, jd_utc, julian_centuries};

/// Lahiri reference value, 23°51′ in arcseconds.
pub const LAHIRI_REFERENCE_ARCSEC: f64 = 85_860.0;

/// General precession in longitude, arcseconds per Julian century.
pub const PRECESSION_ARCSEC_PER_CENTURY: f64 = 5028.796_195;

/// Lahiri ayanamsha at J2000.0 in degrees, for the precessing model.
pub const LAHIRI_J2000_DEG: f64 = 23.853;

/// Ayanamsha approximation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AyanamshaModel {
    /// `(85860″ − 5028.796195″·T) / 3600`, T in Julian centuries from the
    /// civil Gregorian date. The default.
    #[default]
    LahiriLinear,
    /// Lahiri anchored at 23.853° for J2000.0 plus linear general precession.
    LahiriPrecessing,
}

impl AyanamshaModel {
    /// Configuration key.
    pub const fn key(self) -> &'static str {
        match self {
            Self::LahiriLinear => "lahiri_linear",
            Self::LahiriPrecessing => "lahiri_precessing",
        }
    }
}

impl FromStr for AyanamshaModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lahiri_linear" | "lahiri" => Ok(Self::LahiriLinear),
            "lahiri_precessing" => Ok(Self::LahiriPrecessing),
            other => Err(format!("unknown ayanamsha model {other:?}")),
        }
    }
}

/// Ayanamsha in degrees at an instant.
pub fn ayanamsha_deg(model: AyanamshaModel, at: &DateTime<Utc>) -> f64 {
    match model {
        AyanamshaModel::LahiriLinear => {
            let t = calendar_centuries(at);
            (LAHIRI_REFERENCE_ARCSEC - PRECESSION_ARCSEC_PER_CENTURY * t) / 3600.0
        }
        AyanamshaModel::LahiriPrecessing => {
            let t = julian_centuries(jd_utc(at));
            LAHIRI_J2000_DEG + PRECESSION_ARCSEC_PER_CENTURY * t / 3600.0
        }
    }
}

/// Sidereal solar longitude `(λ☉ − ayanamsha) mod 360` in degrees.
pub fn sidereal_solar_longitude(
    provider: &dyn PositionProvider,
    model: AyanamshaModel,
    at: &DateTime<Utc>,
) -> Result<f64, EphemerisError> {
    let sun = provider.apparent_position(Body::Sun, at)?;
    Ok(normalize_360(sun.longitude_deg - ayanamsha_deg(model, at)))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn linear_at_j2000_is_reference() {
        let at = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let a = ayanamsha_deg(AyanamshaModel::LahiriLinear, &at);
        assert!((a - 23.85).abs() < 1e-9, "ayanamsha = {a}");
    }

    #[test]
    fn linear_decreases_one_century_later() {
        let at = Utc.with_ymd_and_hms(2100, 1, 1, 12, 0, 0).unwrap();
        let a = ayanamsha_deg(AyanamshaModel::LahiriLinear, &at);
        let expected = 23.85 - 5028.796_195 / 3600.0;
        assert!((a - expected).abs() < 1e-3, "ayanamsha = {a}");
    }

    #[test]
    fn precessing_grows_with_time() {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let a = ayanamsha_deg(AyanamshaModel::LahiriPrecessing, &at);
        assert!((a - 24.2).abs() < 0.05, "ayanamsha = {a}");
    }

    #[test]
    fn parse_keys() {
        assert_eq!(
            "lahiri_linear".parse::<AyanamshaModel>().unwrap(),
            AyanamshaModel::LahiriLinear
        );
        assert_eq!(
            " Lahiri_Precessing ".parse::<AyanamshaModel>().unwrap(),
            AyanamshaModel::LahiriPrecessing
        );
        assert!("raman".parse::<AyanamshaModel>().is_err());
        assert_eq!(AyanamshaModel::default().key(), "lahiri_linear");
    }
}
