//! Per-request evaluation context and per-day probing.
//!
//! Every probe returns a [`DayOutcome`]: a hit, a miss, or a skipped day with
//! its reason. Only ephemeris failures and invalid inputs propagate as
//! errors; undefined sunrise, missing moonrise and nonexistent local times
//! degrade to `Skipped` for that day.

use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use chrono_tz::Tz;
use vrat_base::{
    AyanamshaModel, GeoLocation, Masa, RiseSetProvider, SunTimes, VedicError, local_instant,
    sidereal_solar_longitude, tithi_at,
};
use vrat_ephem::PositionProvider;

use crate::error::SearchError;
use crate::lunation_types::LunationInterval;
use crate::masa_map::AmantaMonthMap;
use crate::search_util::{clamp_to_year, days_between};

/// Observance tradition; only affects Ekadashi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tradition {
    #[default]
    Smartha,
    Vaishnava,
}

impl Tradition {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Smartha => "smartha",
            Self::Vaishnava => "vaishnava",
        }
    }
}

impl FromStr for Tradition {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smartha" => Ok(Self::Smartha),
            "vaishnava" => Ok(Self::Vaishnava),
            _ => Err(SearchError::UnknownTradition(s.to_string())),
        }
    }
}

/// Why a day was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Sunrise or sunset does not occur.
    RiseSetUndefined,
    /// The Moon does not rise on this date.
    NoMoonrise,
    /// The requested wall-clock time does not exist in the zone.
    LocalTimeInvalid,
    /// An instant could not be converted.
    TimeConversion,
}

/// Result of testing one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DayOutcome<T> {
    Hit(T),
    Miss,
    Skipped(SkipReason),
}

impl<T> DayOutcome<T> {
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DayOutcome<U> {
        match self {
            Self::Hit(v) => DayOutcome::Hit(f(v)),
            Self::Miss => DayOutcome::Miss,
            Self::Skipped(r) => DayOutcome::Skipped(r),
        }
    }

    pub fn hit(self) -> Option<T> {
        match self {
            Self::Hit(v) => Some(v),
            _ => None,
        }
    }
}

/// Classify a calendar-primitive error as a skipped day or a hard failure.
pub(crate) fn per_day<T>(result: Result<T, VedicError>) -> Result<DayOutcome<T>, SearchError> {
    match result {
        Ok(v) => Ok(DayOutcome::Hit(v)),
        Err(VedicError::RiseSetUndefined { .. }) => {
            Ok(DayOutcome::Skipped(SkipReason::RiseSetUndefined))
        }
        Err(VedicError::Time(_)) => Ok(DayOutcome::Skipped(SkipReason::TimeConversion)),
        Err(e) => Err(e.into()),
    }
}

/// Instant at which a day is tested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    Sunrise,
    Sunset,
    Moonrise,
    /// Fixed local wall-clock time.
    LocalClock { hour: u32, minute: u32 },
    /// Every full local hour in the range.
    Hours(RangeInclusive<u32>),
}

impl Probe {
    pub const ALL_HOURS: Probe = Probe::Hours(0..=23);
}

/// Passes of a day scan: each pass walks the whole window and tests each
/// day with its probes in order.
pub type Strategy<'s> = &'s [&'s [Probe]];

/// Sunrise test, then an hourly fallback pass.
pub const SUNRISE_THEN_HOURLY: Strategy<'static> = &[&[Probe::Sunrise], &[Probe::ALL_HOURS]];

/// First day in `days` with a hit. Skipped days are logged and passed over.
pub fn scan_first<T>(
    days: impl IntoIterator<Item = NaiveDate>,
    mut test: impl FnMut(NaiveDate) -> Result<DayOutcome<T>, SearchError>,
) -> Result<Option<(NaiveDate, T)>, SearchError> {
    for date in days {
        match test(date)? {
            DayOutcome::Hit(v) => return Ok(Some((date, v))),
            DayOutcome::Miss => {}
            DayOutcome::Skipped(reason) => tracing::debug!(%date, ?reason, "day skipped"),
        }
    }
    Ok(None)
}

/// Inputs shared by all rules for one location and year.
#[derive(Clone, Copy)]
pub struct ObservanceContext<'a> {
    pub location: &'a GeoLocation,
    pub tz: Tz,
    pub year: i32,
    pub tradition: Tradition,
    pub ayanamsha: AyanamshaModel,
    pub intervals: &'a [LunationInterval],
    pub month_map: Option<&'a AmantaMonthMap>,
    pub positions: &'a dyn PositionProvider,
    pub rise_set: &'a dyn RiseSetProvider,
}

impl std::fmt::Debug for ObservanceContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservanceContext")
            .field("location", self.location)
            .field("tz", &self.tz)
            .field("year", &self.year)
            .field("tradition", &self.tradition)
            .field("intervals", &self.intervals.len())
            .finish_non_exhaustive()
    }
}

impl<'a> ObservanceContext<'a> {
    /// Tithi number in force at an instant.
    pub fn tithi_at(&self, at: &DateTime<Utc>) -> Result<u8, SearchError> {
        Ok(tithi_at(self.positions, at)?.number())
    }

    /// Sidereal solar longitude at an instant.
    pub fn sidereal_sun(&self, at: &DateTime<Utc>) -> Result<f64, SearchError> {
        Ok(sidereal_solar_longitude(self.positions, self.ayanamsha, at)?)
    }

    pub fn sun_times(&self, date: NaiveDate) -> Result<DayOutcome<SunTimes>, SearchError> {
        per_day(self.rise_set.sun_times(self.location, date, &self.tz))
    }

    /// Local sunrise as a UTC instant.
    pub fn sunrise(&self, date: NaiveDate) -> Result<DayOutcome<DateTime<Utc>>, SearchError> {
        Ok(self.sun_times(date)?.map(|t| t.sunrise.to_utc()))
    }

    /// Tithi number at local sunrise.
    pub fn tithi_at_sunrise(&self, date: NaiveDate) -> Result<DayOutcome<u8>, SearchError> {
        match self.sunrise(date)? {
            DayOutcome::Hit(at) => Ok(DayOutcome::Hit(self.tithi_at(&at)?)),
            DayOutcome::Miss => Ok(DayOutcome::Miss),
            DayOutcome::Skipped(r) => Ok(DayOutcome::Skipped(r)),
        }
    }

    fn probe_instants(
        &self,
        date: NaiveDate,
        probe: &Probe,
    ) -> Result<DayOutcome<Vec<DateTime<Utc>>>, SearchError> {
        let single = |o: DayOutcome<DateTime<Utc>>| o.map(|t| vec![t]);
        Ok(match probe {
            Probe::Sunrise => single(self.sunrise(date)?),
            Probe::Sunset => single(self.sun_times(date)?.map(|t| t.sunset.to_utc())),
            Probe::Moonrise => match per_day(self.rise_set.moonrise(self.location, date, &self.tz))? {
                DayOutcome::Hit(Some(t)) => DayOutcome::Hit(vec![t.to_utc()]),
                DayOutcome::Hit(None) => DayOutcome::Skipped(SkipReason::NoMoonrise),
                DayOutcome::Miss => DayOutcome::Miss,
                DayOutcome::Skipped(r) => DayOutcome::Skipped(r),
            },
            Probe::LocalClock { hour, minute } => {
                match local_instant(&self.tz, date, *hour, *minute) {
                    Some(t) => DayOutcome::Hit(vec![t.to_utc()]),
                    None => DayOutcome::Skipped(SkipReason::LocalTimeInvalid),
                }
            }
            Probe::Hours(hours) => {
                let instants: Vec<_> = hours
                    .clone()
                    .filter_map(|h| local_instant(&self.tz, date, h, 0))
                    .map(|t| t.to_utc())
                    .collect();
                if instants.is_empty() {
                    DayOutcome::Skipped(SkipReason::LocalTimeInvalid)
                } else {
                    DayOutcome::Hit(instants)
                }
            }
        })
    }

    /// Whether `target` is in force at any instant of a probe on `date`.
    ///
    /// A hit carries the first matching instant.
    pub fn probe_tithi(
        &self,
        date: NaiveDate,
        probe: &Probe,
        target: u8,
    ) -> Result<DayOutcome<DateTime<Utc>>, SearchError> {
        let instants = match self.probe_instants(date, probe)? {
            DayOutcome::Hit(v) => v,
            DayOutcome::Miss => return Ok(DayOutcome::Miss),
            DayOutcome::Skipped(r) => return Ok(DayOutcome::Skipped(r)),
        };
        for at in instants {
            if self.tithi_at(&at)? == target {
                return Ok(DayOutcome::Hit(at));
            }
        }
        Ok(DayOutcome::Miss)
    }

    /// Try several probes on one day, first hit wins.
    ///
    /// The day counts as skipped only when every probe was skipped.
    pub fn probe_any(
        &self,
        date: NaiveDate,
        probes: &[Probe],
        target: u8,
    ) -> Result<DayOutcome<DateTime<Utc>>, SearchError> {
        let mut first_skip = None;
        let mut any_tested = false;
        for probe in probes {
            match self.probe_tithi(date, probe, target)? {
                DayOutcome::Hit(at) => return Ok(DayOutcome::Hit(at)),
                DayOutcome::Miss => any_tested = true,
                DayOutcome::Skipped(r) => {
                    first_skip.get_or_insert(r);
                }
            }
        }
        Ok(match (any_tested, first_skip) {
            (false, Some(r)) => DayOutcome::Skipped(r),
            _ => DayOutcome::Miss,
        })
    }

    /// First date in `[first, last]` where `target` holds, trying each pass
    /// of `strategy` over the whole window before the next.
    pub fn find_tithi_day(
        &self,
        first: NaiveDate,
        last: NaiveDate,
        target: u8,
        strategy: Strategy<'_>,
    ) -> Result<Option<NaiveDate>, SearchError> {
        for probes in strategy {
            let found = scan_first(days_between(first, last), |d| {
                self.probe_any(d, probes, target)
            })?;
            if let Some((date, _)) = found {
                return Ok(Some(date));
            }
        }
        Ok(None)
    }

    /// Local date window of an interval clamped to the context year.
    pub fn interval_window(&self, interval: &LunationInterval) -> Option<(NaiveDate, NaiveDate)> {
        let (first, last) = interval.local_dates(&self.tz);
        clamp_to_year(first, last, self.year)
    }

    /// Intervals named `masa`, in order.
    pub fn intervals_named(&self, masa: Masa) -> impl Iterator<Item = (usize, &'a LunationInterval)> {
        self.intervals
            .iter()
            .enumerate()
            .filter(move |(_, iv)| iv.masa == masa)
    }

    /// First date where `target` holds inside an interval named `masa`.
    ///
    /// Intervals are tried in order, so an adhika month wins over the nija
    /// month that follows it. Returns the date and the interval index.
    pub fn find_in_masa(
        &self,
        masa: Masa,
        target: u8,
        strategy: Strategy<'_>,
    ) -> Result<Option<(NaiveDate, usize)>, SearchError> {
        for (idx, iv) in self.intervals_named(masa) {
            let Some((first, last)) = self.interval_window(iv) else {
                continue;
            };
            if let Some(date) = self.find_tithi_day(first, last, target, strategy)? {
                return Ok(Some((date, idx)));
            }
        }
        Ok(None)
    }

    /// First date in a civil window, clamped to the context year.
    pub fn find_in_window(
        &self,
        first: NaiveDate,
        last: NaiveDate,
        target: u8,
        strategy: Strategy<'_>,
    ) -> Result<Option<NaiveDate>, SearchError> {
        match clamp_to_year(first, last, self.year) {
            Some((a, b)) => self.find_tithi_day(a, b, target, strategy),
            None => Ok(None),
        }
    }

    /// Month name for a civil date when a month map is attached.
    pub fn masa_for(&self, date: NaiveDate) -> Option<Masa> {
        self.month_map.and_then(|m| m.masa_for(date).ok())
    }

    /// Evenly spaced instants across the central fifth of daylight.
    pub fn midday_samples(&self, times: &SunTimes, samples: u32) -> Vec<DateTime<Utc>> {
        let span_ms = times.daylight().num_milliseconds();
        let start = times.sunrise.to_utc() + TimeDelta::milliseconds(span_ms * 2 / 5);
        let width_ms = span_ms / 5;
        let n = i64::from(samples.max(2));
        (0..n)
            .map(|i| start + TimeDelta::milliseconds(width_ms * i / (n - 1)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn tradition_parse() {
        assert_eq!("Smartha".parse::<Tradition>().unwrap(), Tradition::Smartha);
        assert_eq!(" vaishnava".parse::<Tradition>().unwrap(), Tradition::Vaishnava);
        assert!(matches!(
            "iskcon".parse::<Tradition>(),
            Err(SearchError::UnknownTradition(_))
        ));
    }

    #[test]
    fn per_day_classification() {
        let d = NaiveDate::from_ymd_opt(2025, 6, 21).unwrap();
        let undefined: Result<(), _> = Err(VedicError::RiseSetUndefined {
            date: d,
            reason: "polar day",
        });
        assert_eq!(
            per_day(undefined).unwrap(),
            DayOutcome::Skipped(SkipReason::RiseSetUndefined)
        );
        let bad: Result<(), _> = Err(VedicError::InvalidLocation("lat"));
        assert!(per_day(bad).is_err());
    }

    #[test]
    fn scan_first_skips_and_stops_at_first_hit() {
        let d0 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let days = days_between(d0, d0 + TimeDelta::days(9));
        let mut calls = 0;
        let found = scan_first(days, |d| {
            calls += 1;
            Ok(match (d - d0).num_days() {
                0 => DayOutcome::Skipped(SkipReason::NoMoonrise),
                3 | 5 => DayOutcome::Hit(()),
                _ => DayOutcome::Miss,
            })
        })
        .unwrap();
        assert_eq!(found, Some((d0 + TimeDelta::days(3), ())));
        assert_eq!(calls, 4);
    }

    #[test]
    fn outcome_helpers() {
        let h: DayOutcome<u8> = DayOutcome::Hit(4);
        assert!(h.is_hit());
        assert_eq!(h.map(|v| v * 2).hit(), Some(8));
        assert_eq!(DayOutcome::<u8>::Miss.hit(), None);
    }

    #[test]
    fn midday_window_is_central_fifth() {
        let tz = chrono_tz::Asia::Kolkata;
        let times = SunTimes {
            sunrise: tz.with_ymd_and_hms(2025, 4, 6, 6, 0, 0).unwrap(),
            sunset: tz.with_ymd_and_hms(2025, 4, 6, 18, 30, 0).unwrap(),
        };
        // 12.5 h daylight: window 11:00–13:30 IST
        let loc = GeoLocation::new(19.076, 72.8777, 0.0);
        let eph = vrat_ephem::AnalyticEphemeris::with_default();
        let rs = vrat_base::AstronomicalRiseSet::new(
            std::sync::Arc::new(vrat_ephem::AnalyticEphemeris::with_default()),
            Default::default(),
        );
        let ctx = ObservanceContext {
            location: &loc,
            tz,
            year: 2025,
            tradition: Tradition::Smartha,
            ayanamsha: AyanamshaModel::default(),
            intervals: &[],
            month_map: None,
            positions: &eph,
            rise_set: &rs,
        };
        let s = ctx.midday_samples(&times, 13);
        assert_eq!(s.len(), 13);
        assert_eq!(s[0], tz.with_ymd_and_hms(2025, 4, 6, 11, 0, 0).unwrap().to_utc());
        assert_eq!(s[12], tz.with_ymd_and_hms(2025, 4, 6, 13, 30, 0).unwrap().to_utc());
    }
}
