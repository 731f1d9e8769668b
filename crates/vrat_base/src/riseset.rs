//! Sunrise/sunset and moonrise computation.
//!
//! Sunrise and sunset use the iterative hour-angle method: start from the
//! approximate local noon, estimate the event from the semi-diurnal arc, then
//! refine with the Sun's position at the estimated time until the correction
//! drops below ~0.1 s. Moonrise scans the local civil day hourly for the
//! altitude crossing h0 and bisects the bracketing hour.

use std::f64::consts::{PI, TAU};
use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};
use chrono_tz::Tz;
use vrat_ephem::{Body, PositionProvider, moon::horizontal_parallax_deg};
use vrat_time::{
    SIDEREAL_RATE_RAD_PER_DAY, calendar_to_jd, jd_utc, local_sidereal_time_rad, utc_from_jd,
};

use crate::error::VedicError;
use crate::riseset_types::{GeoLocation, RiseSetConfig, RiseSetResult, SunTimes};
use crate::timezone::local_day_bounds;

/// Maximum iterations for the rise/set refinement loop.
const MAX_ITERATIONS: usize = 5;

/// Convergence threshold in days (~0.086 seconds).
const CONVERGENCE_DAYS: f64 = 1.0e-6;

/// Coarse step of the moonrise scan.
const MOON_SCAN_STEP_MINUTES: i64 = 60;

/// Bisection stops once the bracket is shorter than this.
const MOON_BISECT_TOLERANCE_MS: i64 = 1000;

/// Local rise/set source consumed by the rule engine.
pub trait RiseSetProvider: Send + Sync {
    /// Sunrise and sunset on a local civil date.
    ///
    /// Fails with [`VedicError::RiseSetUndefined`] in polar day or night.
    fn sun_times(
        &self,
        location: &GeoLocation,
        date: NaiveDate,
        tz: &Tz,
    ) -> Result<SunTimes, VedicError>;

    /// First moonrise on a local civil date, `None` when the Moon does not
    /// rise that day.
    fn moonrise(
        &self,
        location: &GeoLocation,
        date: NaiveDate,
        tz: &Tz,
    ) -> Result<Option<DateTime<Tz>>, VedicError>;
}

/// Approximate local solar noon JD from 0h UT JD and longitude.
///
/// `JD_noon = JD_0h + 0.5 - longitude_deg / 360`
pub fn approximate_local_noon_jd(jd_ut_midnight: f64, longitude_deg: f64) -> f64 {
    jd_ut_midnight + 0.5 - longitude_deg / 360.0
}

/// Wrap a hour angle into [-π, π].
fn wrap_pi(x: f64) -> f64 {
    let r = x.rem_euclid(TAU);
    if r > PI { r - TAU } else { r }
}

fn instant(jd: f64) -> Result<DateTime<Utc>, VedicError> {
    Ok(utc_from_jd(jd)?)
}

/// Geocentric altitude in radians of a body at RA/Dec for an observer.
fn altitude_rad(phi: f64, lst: f64, ra: f64, dec: f64) -> f64 {
    let ha = lst - ra;
    (phi.sin() * dec.sin() + phi.cos() * dec.cos() * ha.cos()).asin()
}

/// Compute a single sunrise or sunset near `jd_utc_noon`.
pub fn compute_sun_event(
    provider: &dyn PositionProvider,
    location: &GeoLocation,
    rising: bool,
    jd_utc_noon: f64,
    config: &RiseSetConfig,
) -> Result<RiseSetResult, VedicError> {
    let phi = location.latitude_rad();
    let h0_rad = config
        .sun_target_altitude_deg(location.altitude_m)
        .to_radians();

    let noon = provider.equatorial(Body::Sun, &instant(jd_utc_noon)?)?;
    let cos_h0 = (h0_rad.sin() - phi.sin() * noon.dec_rad.sin())
        / (phi.cos() * noon.dec_rad.cos());
    if cos_h0 > 1.0 {
        return Ok(RiseSetResult::NeverRises);
    }
    if cos_h0 < -1.0 {
        return Ok(RiseSetResult::NeverSets);
    }
    let h0 = cos_h0.acos();

    let lst_noon = local_sidereal_time_rad(jd_utc_noon, location.longitude_deg);
    let ha_noon = wrap_pi(lst_noon - noon.ra_rad);
    let jd_transit = jd_utc_noon - ha_noon / SIDEREAL_RATE_RAD_PER_DAY;

    let h0_days = h0 / SIDEREAL_RATE_RAD_PER_DAY;
    let mut jd_event = if rising {
        jd_transit - h0_days
    } else {
        jd_transit + h0_days
    };

    for _ in 0..MAX_ITERATIONS {
        let sun = provider.equatorial(Body::Sun, &instant(jd_event)?)?;
        let cos_h = (h0_rad.sin() - phi.sin() * sun.dec_rad.sin())
            / (phi.cos() * sun.dec_rad.cos());
        if cos_h > 1.0 {
            return Ok(RiseSetResult::NeverRises);
        }
        if cos_h < -1.0 {
            return Ok(RiseSetResult::NeverSets);
        }
        let h_target = cos_h.acos();
        let ha_target = if rising { -h_target } else { h_target };

        let lst = local_sidereal_time_rad(jd_event, location.longitude_deg);
        let ha_actual = wrap_pi(lst - sun.ra_rad);
        let correction = wrap_pi(ha_target - ha_actual) / SIDEREAL_RATE_RAD_PER_DAY;
        jd_event += correction;

        if correction.abs() < CONVERGENCE_DAYS {
            break;
        }
    }

    Ok(RiseSetResult::Event { jd_utc: jd_event })
}

/// Rise/set provider computing events from any [`PositionProvider`].
#[derive(Clone)]
pub struct AstronomicalRiseSet {
    provider: Arc<dyn PositionProvider>,
    config: RiseSetConfig,
}

impl std::fmt::Debug for AstronomicalRiseSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AstronomicalRiseSet")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AstronomicalRiseSet {
    pub fn new(provider: Arc<dyn PositionProvider>, config: RiseSetConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &RiseSetConfig {
        &self.config
    }

    /// Moon altitude above its rise threshold, in degrees.
    fn moon_altitude_excess_deg(
        &self,
        location: &GeoLocation,
        at: &DateTime<Utc>,
    ) -> Result<f64, VedicError> {
        let moon = self.provider.equatorial(Body::Moon, at)?;
        let lst = local_sidereal_time_rad(jd_utc(at), location.longitude_deg);
        let alt =
            altitude_rad(location.latitude_rad(), lst, moon.ra_rad, moon.dec_rad).to_degrees();
        let parallax = horizontal_parallax_deg(moon.distance_km);
        let h0 = self
            .config
            .moon_target_altitude_deg(parallax, location.altitude_m);
        Ok(alt - h0)
    }
}

impl RiseSetProvider for AstronomicalRiseSet {
    fn sun_times(
        &self,
        location: &GeoLocation,
        date: NaiveDate,
        tz: &Tz,
    ) -> Result<SunTimes, VedicError> {
        let jd0 = calendar_to_jd(date.year(), date.month(), f64::from(date.day()));
        let noon = approximate_local_noon_jd(jd0, location.longitude_deg);
        let provider = self.provider.as_ref();

        let mut events = [0.0_f64; 2];
        for (slot, rising) in events.iter_mut().zip([true, false]) {
            match compute_sun_event(provider, location, rising, noon, &self.config)? {
                RiseSetResult::Event { jd_utc } => *slot = jd_utc,
                RiseSetResult::NeverRises => {
                    return Err(VedicError::RiseSetUndefined {
                        date,
                        reason: "sun stays below the horizon",
                    });
                }
                RiseSetResult::NeverSets => {
                    return Err(VedicError::RiseSetUndefined {
                        date,
                        reason: "sun stays above the horizon",
                    });
                }
            }
        }

        Ok(SunTimes {
            sunrise: instant(events[0])?.with_timezone(tz),
            sunset: instant(events[1])?.with_timezone(tz),
        })
    }

    fn moonrise(
        &self,
        location: &GeoLocation,
        date: NaiveDate,
        tz: &Tz,
    ) -> Result<Option<DateTime<Tz>>, VedicError> {
        let Some((start, end)) = local_day_bounds(tz, date) else {
            return Ok(None);
        };
        let end = end.with_timezone(&Utc);
        let step = TimeDelta::minutes(MOON_SCAN_STEP_MINUTES);

        let mut lo = start.with_timezone(&Utc);
        let mut f_lo = self.moon_altitude_excess_deg(location, &lo)?;
        while lo < end {
            let hi = (lo + step).min(end);
            let f_hi = self.moon_altitude_excess_deg(location, &hi)?;
            if f_lo < 0.0 && f_hi >= 0.0 {
                let (mut a, mut b) = (lo, hi);
                while (b - a).num_milliseconds() > MOON_BISECT_TOLERANCE_MS {
                    let mid = a + (b - a) / 2;
                    if self.moon_altitude_excess_deg(location, &mid)? < 0.0 {
                        a = mid;
                    } else {
                        b = mid;
                    }
                }
                return Ok(Some(b.with_timezone(tz)));
            }
            lo = hi;
            f_lo = f_hi;
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_noon_greenwich() {
        let jd_0h = 2_460_000.5;
        let noon = approximate_local_noon_jd(jd_0h, 0.0);
        assert!((noon - (jd_0h + 0.5)).abs() < 1e-10);
    }

    #[test]
    fn local_noon_east_90() {
        let jd_0h = 2_460_000.5;
        let noon = approximate_local_noon_jd(jd_0h, 90.0);
        assert!((noon - (jd_0h + 0.25)).abs() < 1e-10);
    }

    #[test]
    fn wrap_pi_range() {
        assert!((wrap_pi(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((wrap_pi(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn altitude_at_zenith() {
        let phi = 0.3;
        let alt = altitude_rad(phi, 1.0, 1.0, phi);
        assert!((alt - PI / 2.0).abs() < 1e-9);
    }
}
