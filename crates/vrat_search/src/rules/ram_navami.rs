//! Ram Navami: the Chaitra day whose midday is most covered by Shukla Navami.
//!
//! For each day of the month the central fifth of daylight is sampled at
//! thirteen evenly spaced instants; the score is the fraction of samples in
//! tithi 9. The highest score wins and ties go to the later date. When no
//! day scores above zero the usual sunrise-then-hourly search decides.

use chrono::NaiveDate;
use vrat_base::Masa;

use crate::context::{DayOutcome, ObservanceContext, SUNRISE_THEN_HOURLY};
use crate::error::SearchError;
use crate::event::Event;
use crate::rules::festivals::festival;
use crate::search_util::days_between;

const NAVAMI: u8 = 9;
const MIDDAY_SAMPLES: u32 = 13;
const SUMMARY: &str = "Ram Navami";

/// Best-scoring date; later dates win ties.
pub(crate) fn best_by_score(scores: &[(NaiveDate, f64)]) -> Option<(NaiveDate, f64)> {
    scores
        .iter()
        .copied()
        .filter(|(_, s)| *s > 0.0)
        .fold(None, |best, (d, s)| match best {
            Some((_, bs)) if bs > s => best,
            _ => Some((d, s)),
        })
}

pub fn ram_navami(ctx: &ObservanceContext<'_>) -> Result<Vec<Event>, SearchError> {
    for (_, iv) in ctx.intervals_named(Masa::Chaitra) {
        let Some((first, last)) = ctx.interval_window(iv) else {
            continue;
        };

        let mut scores = Vec::new();
        for date in days_between(first, last) {
            let times = match ctx.sun_times(date)? {
                DayOutcome::Hit(t) => t,
                DayOutcome::Miss => continue,
                DayOutcome::Skipped(reason) => {
                    tracing::debug!(%date, ?reason, "Ram Navami day skipped");
                    continue;
                }
            };
            let samples = ctx.midday_samples(&times, MIDDAY_SAMPLES);
            let mut inside = 0usize;
            for at in &samples {
                if ctx.tithi_at(at)? == NAVAMI {
                    inside += 1;
                }
            }
            scores.push((date, inside as f64 / samples.len() as f64));
        }

        if let Some((date, score)) = best_by_score(&scores) {
            let what = format!("Chaitra Shukla Navami over {:.0}% of midday", score * 100.0);
            return Ok(vec![festival(ctx, SUMMARY, &what, date)]);
        }
        if let Some(date) = ctx.find_tithi_day(first, last, NAVAMI, SUNRISE_THEN_HOURLY)? {
            return Ok(vec![festival(
                ctx,
                SUMMARY,
                "Chaitra Shukla Navami outside midday",
                date,
            )]);
        }
    }
    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, day).unwrap()
    }

    #[test]
    fn highest_score_wins() {
        let scores = [(d(5), 0.2), (d(6), 1.0), (d(7), 0.4)];
        assert_eq!(best_by_score(&scores), Some((d(6), 1.0)));
    }

    #[test]
    fn ties_prefer_later_date() {
        let scores = [(d(5), 0.0), (d(6), 0.5), (d(7), 0.5)];
        assert_eq!(best_by_score(&scores), Some((d(7), 0.5)));
    }

    #[test]
    fn all_zero_is_none() {
        assert_eq!(best_by_score(&[(d(5), 0.0), (d(6), 0.0)]), None);
    }
}
