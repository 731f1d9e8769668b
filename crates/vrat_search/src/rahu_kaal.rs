//! Rahu Kaal over a civil year.
//!
//! One window is computed per local date. Windows are then grouped by the
//! local date of their start; when a group holds more than one window the
//! one starting latest is kept and the others are recorded as conflicts
//! instead of being dropped silently.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use chrono_tz::Tz;
use vrat_base::{GeoLocation, RahuKaalWindow, RiseSetProvider, rahu_kaal_for};

use crate::context::{DayOutcome, per_day};
use crate::error::SearchError;
use crate::event::{Event, EventCategory};
use crate::search_util::{days_between, year_bounds};

/// Summary used for every Rahu Kaal event.
pub const RAHU_KAAL_SUMMARY: &str = "Rahu Kaal";

/// Two windows whose starts fall on the same local date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RahuKaalConflict {
    pub date: NaiveDate,
    pub kept: RahuKaalWindow,
    pub discarded: RahuKaalWindow,
}

/// A year of Rahu Kaal windows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RahuKaalReport {
    /// One window per start date, ascending.
    pub windows: Vec<RahuKaalWindow>,
    /// Windows replaced by a later-starting one on the same date.
    pub conflicts: Vec<RahuKaalConflict>,
    /// Dates with no sunrise/sunset.
    pub skipped: Vec<NaiveDate>,
}

impl RahuKaalReport {
    /// Group windows by start date, keeping the latest start per date.
    pub fn from_windows(windows: impl IntoIterator<Item = RahuKaalWindow>) -> Self {
        let mut by_date: BTreeMap<NaiveDate, RahuKaalWindow> = BTreeMap::new();
        let mut conflicts = Vec::new();
        for w in windows {
            let date = w.start.date_naive();
            match by_date.get(&date).copied() {
                None => {
                    by_date.insert(date, w);
                }
                Some(prev) => {
                    let (kept, discarded) = if w.start > prev.start { (w, prev) } else { (prev, w) };
                    tracing::warn!(%date, kept = %kept.start, discarded = %discarded.start,
                        "multiple Rahu Kaal windows start on one date");
                    conflicts.push(RahuKaalConflict {
                        date,
                        kept,
                        discarded,
                    });
                    by_date.insert(date, kept);
                }
            }
        }
        Self {
            windows: by_date.into_values().collect(),
            conflicts,
            skipped: Vec::new(),
        }
    }

    /// Timed events, one per window.
    pub fn to_events(&self, tz: &Tz) -> Vec<Event> {
        self.windows.iter().map(|w| window_event(w, tz)).collect()
    }
}

/// Timed event for one window.
pub fn window_event(window: &RahuKaalWindow, tz: &Tz) -> Event {
    let mut description = format!(
        "Day divided into eight parts; weekday segment {} of 8 ({}).",
        window.segment,
        tz.name()
    );
    if window.daylight_substituted {
        description.push_str(" Sunset not after sunrise; 12-hour daylight assumed.");
    }
    Event::timed(
        EventCategory::RahuKaal,
        RAHU_KAAL_SUMMARY,
        description,
        window.start.fixed_offset(),
        window.end.fixed_offset(),
    )
}

/// Rahu Kaal for every date of a civil year.
pub fn rahu_kaal_year(
    rise_set: &dyn RiseSetProvider,
    location: &GeoLocation,
    tz: &Tz,
    year: i32,
) -> Result<RahuKaalReport, SearchError> {
    let Some((first, last)) = year_bounds(year) else {
        return Ok(RahuKaalReport::default());
    };
    let mut windows = Vec::with_capacity(366);
    let mut skipped = Vec::new();
    for date in days_between(first, last) {
        match per_day(rahu_kaal_for(rise_set, location, date, tz))? {
            DayOutcome::Hit(w) => windows.push(w),
            DayOutcome::Miss => {}
            DayOutcome::Skipped(reason) => {
                tracing::debug!(%date, ?reason, "no Rahu Kaal");
                skipped.push(date);
            }
        }
    }
    let mut report = RahuKaalReport::from_windows(windows);
    report.skipped = skipped;
    tracing::info!(
        year,
        windows = report.windows.len(),
        skipped = report.skipped.len(),
        conflicts = report.conflicts.len(),
        "Rahu Kaal year computed"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeDelta, TimeZone};

    use super::*;

    fn at(d: u32, h: u32, mi: u32) -> DateTime<Tz> {
        chrono_tz::Asia::Kolkata
            .with_ymd_and_hms(2025, 3, d, h, mi, 0)
            .unwrap()
    }

    fn window(d: u32, h: u32) -> RahuKaalWindow {
        let start = at(d, h, 0);
        RahuKaalWindow {
            date: start.date_naive(),
            start,
            end: start + TimeDelta::minutes(90),
            segment: 2,
            daylight_substituted: false,
        }
    }

    #[test]
    fn latest_start_kept_and_conflict_recorded() {
        let report =
            RahuKaalReport::from_windows([window(20, 13), window(21, 9), window(20, 15)]);
        assert_eq!(report.windows.len(), 2);
        assert_eq!(report.windows[0].start, at(20, 15, 0));
        assert_eq!(report.conflicts.len(), 1);
        assert_eq!(report.conflicts[0].discarded.start, at(20, 13, 0));
    }

    #[test]
    fn events_carry_offset_and_summary() {
        let report = RahuKaalReport::from_windows([window(20, 13)]);
        let events = report.to_events(&chrono_tz::Asia::Kolkata);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary, RAHU_KAAL_SUMMARY);
        assert_eq!(events[0].category, EventCategory::RahuKaal);
        assert!(!events[0].is_all_day());
        assert!(events[0].description.contains("Asia/Kolkata"));
    }
}
