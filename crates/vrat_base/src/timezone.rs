//! Timezone resolution and local-clock helpers.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use tzf_rs::DefaultFinder;

use crate::error::VedicError;
use crate::riseset_types::GeoLocation;

/// Maps a location to the IANA zone its civil dates are counted in.
pub trait TimezoneResolver: Send + Sync {
    fn zone_for(&self, location: &GeoLocation) -> Tz;
}

/// Resolver that returns one configured zone for every location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedZoneResolver {
    zone: Tz,
}

impl FixedZoneResolver {
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }

    /// Resolver for an optional IANA label, falling back to UTC.
    pub fn from_label(label: Option<&str>) -> Self {
        let zone = match label {
            Some(l) => parse_zone(l).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "falling back to UTC");
                Tz::UTC
            }),
            None => {
                tracing::warn!("no timezone configured, civil dates are counted in UTC");
                Tz::UTC
            }
        };
        Self { zone }
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }
}

impl TimezoneResolver for FixedZoneResolver {
    fn zone_for(&self, _location: &GeoLocation) -> Tz {
        self.zone
    }
}

static FINDER: OnceLock<DefaultFinder> = OnceLock::new();

fn finder() -> &'static DefaultFinder {
    FINDER.get_or_init(DefaultFinder::new)
}

/// Resolver that looks the zone up from the coordinates.
///
/// The boundary data is loaded once per process on first use. Points the
/// lookup cannot place resolve to `fallback`, UTC unless set otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateZoneResolver {
    fallback: Tz,
}

impl Default for CoordinateZoneResolver {
    fn default() -> Self {
        Self { fallback: Tz::UTC }
    }
}

impl CoordinateZoneResolver {
    pub fn with_fallback(fallback: Tz) -> Self {
        Self { fallback }
    }

    /// Zone containing the location, if the lookup knows one.
    pub fn lookup(&self, location: &GeoLocation) -> Option<Tz> {
        let name = finder().get_tz_name(location.longitude_deg, location.latitude_deg);
        if name.is_empty() {
            return None;
        }
        match name.parse::<Tz>() {
            Ok(zone) => Some(zone),
            Err(_) => {
                tracing::debug!(name, "zone name from lookup is not a known IANA zone");
                None
            }
        }
    }
}

impl TimezoneResolver for CoordinateZoneResolver {
    fn zone_for(&self, location: &GeoLocation) -> Tz {
        self.lookup(location).unwrap_or_else(|| {
            tracing::warn!(
                lat = location.latitude_deg,
                lon = location.longitude_deg,
                fallback = %self.fallback.name(),
                "no timezone found for coordinates"
            );
            self.fallback
        })
    }
}

/// Parse an IANA zone label such as `Asia/Kolkata`.
pub fn parse_zone(label: &str) -> Result<Tz, VedicError> {
    label
        .trim()
        .parse::<Tz>()
        .map_err(|_| VedicError::InvalidTimeZone(label.to_string()))
}

/// Local wall-clock instant on `date`.
///
/// Ambiguous times (DST fold) resolve to the earlier instant; times inside a
/// DST gap move forward by one hour.
pub fn local_instant(tz: &Tz, date: NaiveDate, hour: u32, minute: u32) -> Option<DateTime<Tz>> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    let naive = date.and_time(time);
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + TimeDelta::hours(1))).earliest())
}

/// `[start, end)` of a local civil day.
pub fn local_day_bounds(tz: &Tz, date: NaiveDate) -> Option<(DateTime<Tz>, DateTime<Tz>)> {
    let start = local_instant(tz, date, 0, 0)?;
    let end = local_instant(tz, date.succ_opt()?, 0, 0)?;
    Some((start, end))
}

/// 12:00 UTC on a civil date, the probe instant for date → month lookups.
pub fn noon_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN + TimeDelta::hours(12)).and_utc()
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_iana_labels() {
        assert_eq!(parse_zone("Asia/Kolkata").unwrap(), chrono_tz::Asia::Kolkata);
        assert!(matches!(
            parse_zone("Mars/Olympus"),
            Err(VedicError::InvalidTimeZone(_))
        ));
    }

    #[test]
    fn unresolvable_label_falls_back_to_utc() {
        assert_eq!(FixedZoneResolver::from_label(Some("nope")).zone(), Tz::UTC);
        assert_eq!(FixedZoneResolver::from_label(None).zone(), Tz::UTC);
        let loc = GeoLocation::new(19.076, 72.8777, 0.0);
        let r = FixedZoneResolver::new(chrono_tz::Asia::Kolkata);
        assert_eq!(r.zone_for(&loc), chrono_tz::Asia::Kolkata);
    }

    #[test]
    fn coordinates_resolve_to_their_zone() {
        let r = CoordinateZoneResolver::default();
        let mumbai = GeoLocation::new(19.076, 72.8777, 0.0);
        assert_eq!(r.zone_for(&mumbai), chrono_tz::Asia::Kolkata);
        let stockholm = GeoLocation::new(59.3293, 18.0686, 0.0);
        assert_eq!(r.zone_for(&stockholm), chrono_tz::Europe::Stockholm);
        let la = GeoLocation::new(34.0522, -118.2437, 0.0);
        assert_eq!(r.lookup(&la), Some(chrono_tz::America::Los_Angeles));
    }

    #[test]
    fn gap_moves_forward_one_hour() {
        // 2025-03-30 02:30 does not exist in Europe/Stockholm
        let tz = chrono_tz::Europe::Stockholm;
        let t = local_instant(&tz, d(2025, 3, 30), 2, 30).unwrap();
        assert_eq!((t.hour(), t.minute()), (3, 30));
    }

    #[test]
    fn day_bounds_span_23_hours_on_spring_forward() {
        let tz = chrono_tz::Europe::Stockholm;
        let (s, e) = local_day_bounds(&tz, d(2025, 3, 30)).unwrap();
        assert_eq!((e - s).num_hours(), 23);
    }

    #[test]
    fn noon_probe() {
        let n = noon_utc(d(2025, 1, 1));
        assert_eq!(n.to_rfc3339(), "2025-01-01T12:00:00+00:00");
    }
}
