//! Rahu Kaal: one weekday-dependent eighth of daylight.
//!
//! Daylight from sunrise to sunset is split into eight equal segments;
//! the weekday picks which one is Rahu Kaal (Mon→2, Tue→7, Wed→5, Thu→6,
//! Fri→4, Sat→3, Sun→8). When sunset does not follow sunrise a fixed
//! 12-hour span from sunrise is used instead.

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Weekday};
use chrono_tz::Tz;

use crate::error::VedicError;
use crate::riseset::RiseSetProvider;
use crate::riseset_types::{GeoLocation, SunTimes};

/// Number of daylight segments.
pub const SEGMENTS: usize = 8;

/// Substitute daylight span when sunset ≤ sunrise.
pub const FALLBACK_DAYLIGHT_HOURS: i64 = 12;

/// 1-based daylight segment holding Rahu Kaal on a weekday.
pub const fn rahu_segment(weekday: Weekday) -> u8 {
    match weekday {
        Weekday::Mon => 2,
        Weekday::Tue => 7,
        Weekday::Wed => 5,
        Weekday::Thu => 6,
        Weekday::Fri => 4,
        Weekday::Sat => 3,
        Weekday::Sun => 8,
    }
}

/// Rahu Kaal window on one local date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RahuKaalWindow {
    /// Local civil date the window was computed for.
    pub date: NaiveDate,
    /// Window start (inclusive).
    pub start: DateTime<Tz>,
    /// Window end (exclusive).
    pub end: DateTime<Tz>,
    /// 1-based daylight segment.
    pub segment: u8,
    /// The 12-hour fallback span replaced the sunrise–sunset span.
    pub daylight_substituted: bool,
}

/// Daylight span with the 12-hour fallback applied.
///
/// Returns `(start, end, substituted)`.
pub fn effective_daylight(times: &SunTimes) -> (DateTime<Tz>, DateTime<Tz>, bool) {
    if times.sunset <= times.sunrise {
        let end = times.sunrise + TimeDelta::hours(FALLBACK_DAYLIGHT_HOURS);
        (times.sunrise, end, true)
    } else {
        (times.sunrise, times.sunset, false)
    }
}

/// The eight `[start, end)` segments partitioning `[sunrise, sunset)`.
///
/// Boundaries are placed at `sunrise + i·span/8` on a millisecond grid, so
/// consecutive segments share endpoints and lengths differ by at most 1 ms.
pub fn daylight_segments(
    sunrise: DateTime<Tz>,
    sunset: DateTime<Tz>,
) -> [(DateTime<Tz>, DateTime<Tz>); SEGMENTS] {
    let span_ms = (sunset - sunrise).num_milliseconds();
    let boundary = |i: i64| sunrise + TimeDelta::milliseconds(span_ms * i / SEGMENTS as i64);
    std::array::from_fn(|i| (boundary(i as i64), boundary(i as i64 + 1)))
}

/// Rahu Kaal from already computed sun times.
pub fn rahu_kaal_window(date: NaiveDate, times: &SunTimes) -> RahuKaalWindow {
    let (start, end, substituted) = effective_daylight(times);
    let segment = rahu_segment(date.weekday());
    let (s, e) = daylight_segments(start, end)[usize::from(segment) - 1];
    RahuKaalWindow {
        date,
        start: s,
        end: e,
        segment,
        daylight_substituted: substituted,
    }
}

/// Rahu Kaal for a location and local date.
pub fn rahu_kaal_for(
    rise_set: &dyn RiseSetProvider,
    location: &GeoLocation,
    date: NaiveDate,
    tz: &Tz,
) -> Result<RahuKaalWindow, VedicError> {
    let times = rise_set.sun_times(location, date, tz)?;
    let window = rahu_kaal_window(date, &times);
    if window.daylight_substituted {
        tracing::debug!(%date, "sunset not after sunrise, using 12h daylight");
    }
    Ok(window)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike};

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32) -> DateTime<Tz> {
        chrono_tz::Asia::Kolkata
            .with_ymd_and_hms(y, m, d, h, mi, 0)
            .unwrap()
    }

    #[test]
    fn weekday_table() {
        let segs: Vec<u8> = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .into_iter()
        .map(rahu_segment)
        .collect();
        assert_eq!(segs, vec![2, 7, 5, 6, 4, 3, 8]);
    }

    #[test]
    fn segments_partition_daylight() {
        let sr = at(2025, 3, 20, 6, 45);
        let ss = at(2025, 3, 20, 18, 49);
        let segs = daylight_segments(sr, ss);
        assert_eq!(segs[0].0, sr);
        assert_eq!(segs[SEGMENTS - 1].1, ss);
        for w in segs.windows(2) {
            assert_eq!(w[0].1, w[1].0);
        }
        let first = (segs[0].1 - segs[0].0).num_milliseconds();
        for (s, e) in segs {
            assert!(((e - s).num_milliseconds() - first).abs() <= 1);
        }
    }

    #[test]
    fn thursday_is_sixth_segment() {
        // 2025-03-20 is a Thursday; 12h daylight → segments of 90 min
        let date = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        let times = SunTimes {
            sunrise: at(2025, 3, 20, 6, 0),
            sunset: at(2025, 3, 20, 18, 0),
        };
        let w = rahu_kaal_window(date, &times);
        assert_eq!(w.segment, 6);
        assert_eq!((w.start.hour(), w.start.minute()), (13, 30));
        assert_eq!((w.end.hour(), w.end.minute()), (15, 0));
        assert!(!w.daylight_substituted);
    }

    #[test]
    fn inverted_daylight_uses_fallback() {
        // 2025-03-23 is a Sunday → last segment of a 12h span
        let date = NaiveDate::from_ymd_opt(2025, 3, 23).unwrap();
        let times = SunTimes {
            sunrise: at(2025, 3, 23, 7, 0),
            sunset: at(2025, 3, 23, 6, 0),
        };
        let w = rahu_kaal_window(date, &times);
        assert!(w.daylight_substituted);
        assert_eq!(w.end, at(2025, 3, 23, 19, 0));
        assert_eq!((w.end - w.start).num_minutes(), 90);
    }
}
