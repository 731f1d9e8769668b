//! Recurring lunar days: Sankashti Chaturthi, Amavasya and Purnima.

use chrono::{Datelike, NaiveDate};
use vrat_base::{AMAVASYA, PURNIMA, Paksha, tithi_abs};

use crate::context::{DayOutcome, ObservanceContext, Probe, Strategy, scan_first};
use crate::error::SearchError;
use crate::event::{Event, EventCategory};
use crate::lunation_types::LunationInterval;
use crate::rules::describe;
use crate::search_util::{days_between, year_bounds};

/// Krishna Chaturthi.
const SANKASHTI_TITHI: u8 = tithi_abs(Paksha::Krishna, 4);

const MOONRISE_FIRST: Strategy<'static> =
    &[&[Probe::Moonrise], &[Probe::Sunrise], &[Probe::ALL_HOURS]];

/// One Sankashti Chaturthi per lunation, preferring the tithi at moonrise.
pub fn sankashti_events(ctx: &ObservanceContext<'_>) -> Result<Vec<Event>, SearchError> {
    let mut out = Vec::new();
    for iv in ctx.intervals {
        let Some((first, last)) = ctx.interval_window(iv) else {
            continue;
        };
        let Some(date) = ctx.find_tithi_day(first, last, SANKASHTI_TITHI, MOONRISE_FIRST)? else {
            tracing::debug!(month = %iv.masa, start = %iv.start, "no Krishna Chaturthi in window");
            continue;
        };
        let at_moonrise = ctx
            .probe_tithi(date, &Probe::Moonrise, SANKASHTI_TITHI)?
            .is_hit();
        let what = if at_moonrise {
            "Krishna Chaturthi (tithi 19) at moonrise"
        } else {
            "Krishna Chaturthi detected during day (no suitable moonrise)"
        };
        out.push(Event::all_day(
            EventCategory::Sankashti,
            "Sankashti Chaturthi (Krishna)",
            describe(ctx, what),
            date,
        ));
    }
    Ok(out)
}

fn amavasya_purnima_summary(tithi: u8) -> &'static str {
    if tithi == AMAVASYA { "Amavasya" } else { "Purnima" }
}

/// First local date on which `target` holds at a full hour inside `iv`,
/// provided it holds at none of the lunation's sunrises.
///
/// The whole lunation is scanned, including dates outside the context year,
/// so a tithi seen at a sunrise of the neighbouring year is not reported
/// twice.
fn between_sunrises(
    ctx: &ObservanceContext<'_>,
    iv: &LunationInterval,
    target: u8,
) -> Result<Option<NaiveDate>, SearchError> {
    let (first, last) = iv.local_dates(&ctx.tz);
    let inside = |date: NaiveDate, probe: &Probe| -> Result<DayOutcome<()>, SearchError> {
        Ok(match ctx.probe_tithi(date, probe, target)? {
            DayOutcome::Hit(at) if iv.contains(&at) => DayOutcome::Hit(()),
            DayOutcome::Skipped(r) => DayOutcome::Skipped(r),
            _ => DayOutcome::Miss,
        })
    };
    if scan_first(days_between(first, last), |d| inside(d, &Probe::Sunrise))?.is_some() {
        return Ok(None);
    }
    Ok(scan_first(days_between(first, last), |d| inside(d, &Probe::ALL_HOURS))?.map(|(d, ())| d))
}

/// Every date of the year with tithi 30 or 15 at sunrise.
///
/// A tithi that begins after one sunrise and ends before the next is
/// placed on the first date it holds at a full hour.
pub fn amavasya_purnima_events(ctx: &ObservanceContext<'_>) -> Result<Vec<Event>, SearchError> {
    let Some((first, last)) = year_bounds(ctx.year) else {
        return Ok(Vec::new());
    };
    let mut out = Vec::new();
    let mut days = days_between(first, last);
    loop {
        let found = scan_first(&mut days, |d| {
            Ok(match ctx.tithi_at_sunrise(d)? {
                DayOutcome::Hit(t) if t == AMAVASYA || t == PURNIMA => DayOutcome::Hit(t),
                DayOutcome::Skipped(r) => DayOutcome::Skipped(r),
                _ => DayOutcome::Miss,
            })
        })?;
        let Some((date, tithi)) = found else { break };
        out.push(Event::all_day(
            EventCategory::AmavasyaPurnima,
            amavasya_purnima_summary(tithi),
            describe(ctx, &format!("Tithi {tithi} at sunrise")),
            date,
        ));
    }

    for iv in ctx.intervals {
        for tithi in [PURNIMA, AMAVASYA] {
            let Some(date) = between_sunrises(ctx, iv, tithi)? else {
                continue;
            };
            if date.year() != ctx.year {
                continue;
            }
            tracing::debug!(%date, tithi, "tithi holds at no sunrise");
            out.push(Event::all_day(
                EventCategory::AmavasyaPurnima,
                amavasya_purnima_summary(tithi),
                describe(ctx, &format!("Tithi {tithi} between sunrises")),
                date,
            ));
        }
    }
    out.sort_by_key(Event::date);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sankashti_is_krishna_chaturthi() {
        assert_eq!(SANKASHTI_TITHI, 19);
    }
}
