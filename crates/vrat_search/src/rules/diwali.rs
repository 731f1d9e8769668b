//! Diwali with Govardhan Puja and Bhai Dooj.
//!
//! Diwali is the first date in October–November with Amavasya at sunrise
//! while the sidereal Sun is in Tula. The two companion days follow at
//! fixed offsets of one and two days.

use chrono::{NaiveDate, TimeDelta};
use vrat_base::{AMAVASYA, Rashi, rashi_index};

use crate::context::{DayOutcome, ObservanceContext, scan_first};
use crate::error::SearchError;
use crate::event::Event;
use crate::rules::festivals::festival;
use crate::search_util::{clamp_to_year, days_between};

const TULA: usize = Rashi::Tula.index();

/// `(offset days, summary, description)` of the bundle.
pub const BUNDLE: [(i64, &str, &str); 3] = [
    (0, "Diwali / Deepavali", "Amavasya at sunrise with the sidereal Sun in Tula"),
    (1, "Govardhan Puja / Annakut", "Day after Diwali"),
    (2, "Bhai Dooj", "Second day after Diwali"),
];

pub fn diwali_bundle(ctx: &ObservanceContext<'_>) -> Result<Vec<Event>, SearchError> {
    let window = NaiveDate::from_ymd_opt(ctx.year, 10, 1)
        .zip(NaiveDate::from_ymd_opt(ctx.year, 11, 30))
        .and_then(|(a, b)| clamp_to_year(a, b, ctx.year));
    let Some((first, last)) = window else {
        return Ok(Vec::new());
    };

    let found = scan_first(days_between(first, last), |d| {
        let at = match ctx.sunrise(d)? {
            DayOutcome::Hit(at) => at,
            DayOutcome::Miss => return Ok(DayOutcome::Miss),
            DayOutcome::Skipped(r) => return Ok(DayOutcome::Skipped(r)),
        };
        let hit = ctx.tithi_at(&at)? == AMAVASYA && rashi_index(ctx.sidereal_sun(&at)?) == TULA;
        Ok(if hit { DayOutcome::Hit(()) } else { DayOutcome::Miss })
    })?;
    let Some((diwali, ())) = found else {
        return Ok(Vec::new());
    };

    Ok(BUNDLE
        .iter()
        .map(|&(offset, summary, what)| {
            festival(ctx, summary, what, diwali + TimeDelta::days(offset))
        })
        .collect())
}
