//! Amanta month naming for lunation intervals and civil dates.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use vrat_base::{AyanamshaModel, Masa, masa_for_sidereal, noon_utc, sidereal_solar_longitude};
use vrat_ephem::{EphemerisError, PositionProvider};

use crate::lunation_types::{Lunation, LunationInterval};
use crate::search_util::{days_between, year_bounds};

/// Month-map lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonthMapError {
    /// No lunation intervals were available for the year.
    #[error("no lunation data for {year}")]
    NoLunationData { year: i32 },
    /// The date is outside every lunation interval of the map.
    #[error("{0} is not covered by any lunation interval")]
    DateNotCovered(NaiveDate),
}

/// Name consecutive lunation pairs.
///
/// The month name comes from the sidereal Sun at the opening new moon.
pub fn amanta_lunation_intervals(
    provider: &dyn PositionProvider,
    lunations: &[Lunation],
    model: AyanamshaModel,
) -> Result<Vec<LunationInterval>, EphemerisError> {
    lunations
        .windows(2)
        .map(|pair| {
            let (start, end) = (pair[0].new_moon, pair[1].new_moon);
            let sid = sidereal_solar_longitude(provider, model, &start)?;
            Ok(LunationInterval {
                start,
                end,
                masa: masa_for_sidereal(sid),
            })
        })
        .collect()
}

/// Index of the interval containing `at`, if any.
///
/// `intervals` must be sorted by start and non-overlapping.
pub fn interval_containing(intervals: &[LunationInterval], at: &DateTime<Utc>) -> Option<usize> {
    let idx = intervals.partition_point(|iv| iv.start <= *at);
    let candidate = idx.checked_sub(1)?;
    intervals[candidate].contains(at).then_some(candidate)
}

/// Dense date → month lookup for one civil year.
///
/// Every date is probed at 12:00 UTC. Dates outside the lunation intervals
/// stay uncovered and are reported instead of defaulting to a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmantaMonthMap {
    year: i32,
    first: NaiveDate,
    months: Vec<Option<Masa>>,
}

impl AmantaMonthMap {
    pub fn build(year: i32, intervals: &[LunationInterval]) -> Result<Self, MonthMapError> {
        let (first, last) = year_bounds(year).ok_or(MonthMapError::NoLunationData { year })?;
        if intervals.is_empty() {
            return Err(MonthMapError::NoLunationData { year });
        }
        let months: Vec<Option<Masa>> = days_between(first, last)
            .map(|date| interval_containing(intervals, &noon_utc(date)).map(|i| intervals[i].masa))
            .collect();

        let uncovered = months.iter().filter(|m| m.is_none()).count();
        if uncovered > 0 {
            tracing::warn!(year, uncovered, "month map has dates outside all lunations");
        }
        Ok(Self {
            year,
            first,
            months,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month name for a civil date of the map's year.
    pub fn masa_for(&self, date: NaiveDate) -> Result<Masa, MonthMapError> {
        let offset = (date - self.first).num_days();
        usize::try_from(offset)
            .ok()
            .and_then(|i| self.months.get(i).copied().flatten())
            .ok_or(MonthMapError::DateNotCovered(date))
    }

    /// Dates of the year with no month name.
    pub fn uncovered_dates(&self) -> Vec<NaiveDate> {
        self.months
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_none())
            .filter_map(|(i, _)| self.first.checked_add_days(chrono::Days::new(i as u64)))
            .collect()
    }

    /// Number of dates in the map.
    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn intervals() -> Vec<LunationInterval> {
        vec![
            LunationInterval {
                start: at(2024, 12, 30, 22),
                end: at(2025, 1, 29, 12),
                masa: Masa::Pausha,
            },
            LunationInterval {
                start: at(2025, 1, 29, 12),
                end: at(2025, 2, 28, 0),
                masa: Masa::Magha,
            },
        ]
    }

    #[test]
    fn empty_intervals_are_no_data() {
        assert_eq!(
            AmantaMonthMap::build(2025, &[]),
            Err(MonthMapError::NoLunationData { year: 2025 })
        );
    }

    #[test]
    fn noon_probe_picks_interval() {
        let map = AmantaMonthMap::build(2025, &intervals()).unwrap();
        assert_eq!(map.len(), 365);
        assert_eq!(map.masa_for(d(2025, 1, 1)), Ok(Masa::Pausha));
        // new moon exactly at noon opens the next month
        assert_eq!(map.masa_for(d(2025, 1, 29)), Ok(Masa::Magha));
        assert_eq!(map.masa_for(d(2025, 2, 27)), Ok(Masa::Magha));
    }

    #[test]
    fn uncovered_dates_are_reported() {
        let map = AmantaMonthMap::build(2025, &intervals()).unwrap();
        assert_eq!(
            map.masa_for(d(2025, 3, 1)),
            Err(MonthMapError::DateNotCovered(d(2025, 3, 1)))
        );
        assert_eq!(
            map.masa_for(d(2024, 12, 31)),
            Err(MonthMapError::DateNotCovered(d(2024, 12, 31)))
        );
        let uncovered = map.uncovered_dates();
        assert_eq!(uncovered.first(), Some(&d(2025, 2, 28)));
        assert_eq!(uncovered.len(), 365 - 58);
    }

    #[test]
    fn containing_lookup() {
        let ivs = intervals();
        assert_eq!(interval_containing(&ivs, &at(2025, 1, 10, 0)), Some(0));
        assert_eq!(interval_containing(&ivs, &at(2025, 1, 29, 12)), Some(1));
        assert_eq!(interval_containing(&ivs, &at(2024, 12, 1, 0)), None);
        assert_eq!(interval_containing(&ivs, &at(2025, 2, 28, 0)), None);
    }
}
