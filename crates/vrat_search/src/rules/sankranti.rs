//! Makara Sankranti: the Sun's sidereal ingress into Makara.

use chrono::NaiveDate;
use vrat_base::{Rashi, rashi_index};

use crate::context::{DayOutcome, ObservanceContext};
use crate::error::SearchError;
use crate::event::{Event, EventCategory};
use crate::rules::describe;
use crate::search_util::{clamp_to_year, days_between};

const MAKARA: usize = Rashi::Makara.index();

/// First sunrise in Jan 1 – Feb 15 with the sidereal Sun in Makara after a
/// sunrise outside it.
pub fn makara_sankranti(ctx: &ObservanceContext<'_>) -> Result<Vec<Event>, SearchError> {
    let window = NaiveDate::from_ymd_opt(ctx.year, 1, 1)
        .zip(NaiveDate::from_ymd_opt(ctx.year, 2, 15))
        .and_then(|(a, b)| clamp_to_year(a, b, ctx.year));
    let Some((first, last)) = window else {
        return Ok(Vec::new());
    };

    let rashi_at_sunrise = |d: NaiveDate| -> Result<Option<usize>, SearchError> {
        Ok(match ctx.sunrise(d)? {
            DayOutcome::Hit(at) => Some(rashi_index(ctx.sidereal_sun(&at)?)),
            DayOutcome::Miss => None,
            DayOutcome::Skipped(reason) => {
                tracing::debug!(date = %d, ?reason, "sankranti day skipped");
                None
            }
        })
    };

    let mut prev = first.pred_opt().map(&rashi_at_sunrise).transpose()?.flatten();
    for date in days_between(first, last) {
        let today = rashi_at_sunrise(date)?;
        if today == Some(MAKARA) && prev.is_some_and(|p| p != MAKARA) {
            return Ok(vec![Event::all_day(
                EventCategory::Festival,
                "Makara Sankranti",
                describe(ctx, "Sidereal Sun enters Makara before sunrise"),
                date,
            )]);
        }
        prev = today;
    }
    Ok(Vec::new())
}
