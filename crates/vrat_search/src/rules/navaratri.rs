//! Shardiya Navaratri and the days that close it.
//!
//! Anchored at the Amavasya ending Bhadrapada: Navaratri begins on the
//! first Pratipada within three days of it, and Ashtami, Navami and Dashami
//! are the first occurrences of tithis 8, 9 and 10 within twelve days of
//! the beginning.

use chrono::TimeDelta;
use vrat_base::Masa;

use crate::context::{ObservanceContext, SUNRISE_THEN_HOURLY};
use crate::error::SearchError;
use crate::event::Event;
use crate::rules::festivals::festival;

const BEGIN_SEARCH_DAYS: i64 = 3;
const CLUSTER_SEARCH_DAYS: i64 = 12;

const CLUSTER: [(u8, &str, &str); 3] = [
    (8, "Durga Ashtami", "Ashwin Shukla Ashtami at sunrise"),
    (9, "Maha Navami", "Ashwin Shukla Navami at sunrise"),
    (10, "Vijayadashami / Dussehra", "Ashwin Shukla Dashami at sunrise"),
];

pub fn navaratri(ctx: &ObservanceContext<'_>) -> Result<Vec<Event>, SearchError> {
    let Some((_, bhadrapada)) = ctx.intervals_named(Masa::Bhadrapada).next() else {
        return Ok(Vec::new());
    };
    let amavasya = bhadrapada.end.with_timezone(&ctx.tz).date_naive();
    let Some(begin) = ctx.find_in_window(
        amavasya,
        amavasya + TimeDelta::days(BEGIN_SEARCH_DAYS),
        1,
        SUNRISE_THEN_HOURLY,
    )?
    else {
        return Ok(Vec::new());
    };

    let mut out = vec![festival(
        ctx,
        "Shardiya Navaratri begins",
        "Ashwin Shukla Pratipada at sunrise",
        begin,
    )];
    let end = begin + TimeDelta::days(CLUSTER_SEARCH_DAYS);
    for (tithi, summary, what) in CLUSTER {
        if let Some(date) = ctx.find_in_window(begin, end, tithi, SUNRISE_THEN_HOURLY)? {
            out.push(festival(ctx, summary, what, date));
        }
    }
    Ok(out)
}
