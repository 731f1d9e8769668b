//! Types for new-moon search and lunation intervals.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use chrono_tz::Tz;
use vrat_base::Masa;

/// Exact new moon (tithi 30 → 1 boundary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Lunation {
    pub new_moon: DateTime<Utc>,
}

/// One amanta lunar month: new moon to next new moon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunationInterval {
    /// Opening new moon (inclusive).
    pub start: DateTime<Utc>,
    /// Closing new moon (exclusive).
    pub end: DateTime<Utc>,
    /// Month name from the sidereal Sun at `start`.
    pub masa: Masa,
}

impl LunationInterval {
    /// Whether `at` lies in `[start, end)`.
    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        self.start <= *at && *at < self.end
    }

    /// First and last local civil dates touched by the interval.
    ///
    /// The last date is that of `end − 1 s`, so a month closing exactly at
    /// local midnight does not claim the following day.
    pub fn local_dates(&self, tz: &Tz) -> (NaiveDate, NaiveDate) {
        let first = self.start.with_timezone(tz).date_naive();
        let last = (self.end - TimeDelta::seconds(1))
            .with_timezone(tz)
            .date_naive();
        (first, last)
    }

    /// Interval length in days.
    pub fn length_days(&self) -> f64 {
        (self.end - self.start).num_milliseconds() as f64 / 86_400_000.0
    }
}

/// Tunables of the new-moon finder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunationSearchConfig {
    /// Initial bracket half-width around a guess.
    pub initial_half_window: TimeDelta,
    /// Symmetric widening applied while the bracket has no sign change.
    pub expansion_step: TimeDelta,
    /// Maximum number of widenings before the guess is discarded.
    pub max_expansions: u32,
    /// Maximum bisection iterations.
    pub max_iterations: u32,
    /// Stop once `|wrap180(λ☾ − λ☉)|` is below this (degrees).
    pub tolerance_deg: f64,
    /// Spacing between successive guesses.
    pub guess_spacing: TimeDelta,
    /// Roots closer than this are treated as the same new moon.
    pub merge_threshold: TimeDelta,
}

impl Default for LunationSearchConfig {
    fn default() -> Self {
        Self {
            initial_half_window: TimeDelta::hours(36),
            expansion_step: TimeDelta::hours(24),
            max_expansions: 6,
            max_iterations: 50,
            tolerance_deg: 1e-4,
            guess_spacing: TimeDelta::days(29) + TimeDelta::hours(13),
            merge_threshold: TimeDelta::hours(18),
        }
    }
}
