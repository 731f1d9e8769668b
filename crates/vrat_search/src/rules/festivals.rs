//! Festivals fixed by amanta month and tithi.

use chrono::NaiveDate;
use vrat_base::{Masa, Tithi};

use crate::context::{ObservanceContext, Probe, SUNRISE_THEN_HOURLY, Strategy};
use crate::error::SearchError;
use crate::event::{Event, EventCategory};
use crate::rules::describe;

/// A festival observed on the first day of a tithi within a named month.
struct MonthlyTithi {
    masa: Masa,
    tithi: u8,
    summary: &'static str,
    strategy: Strategy<'static>,
    /// How the match is described; `None` uses "at sunrise".
    timing: Option<&'static str>,
}

impl MonthlyTithi {
    const fn at_sunrise(masa: Masa, tithi: u8, summary: &'static str) -> Self {
        Self {
            masa,
            tithi,
            summary,
            strategy: SUNRISE_THEN_HOURLY,
            timing: None,
        }
    }

    fn find(&self, ctx: &ObservanceContext<'_>) -> Result<Option<(NaiveDate, usize)>, SearchError> {
        ctx.find_in_masa(self.masa, self.tithi, self.strategy)
    }

    fn event(&self, ctx: &ObservanceContext<'_>, date: NaiveDate) -> Event {
        festival(ctx, self.summary, &self.what(), date)
    }

    fn what(&self) -> String {
        let name = Tithi::from_number(self.tithi)
            .map(|t| format!("{} {}", t.paksha().name(), t.name()))
            .unwrap_or_default();
        format!(
            "{} {name} {}",
            self.masa,
            self.timing.unwrap_or("at sunrise")
        )
    }

    fn evaluate(&self, ctx: &ObservanceContext<'_>) -> Result<Vec<Event>, SearchError> {
        Ok(self
            .find(ctx)?
            .map(|(date, _)| self.event(ctx, date))
            .into_iter()
            .collect())
    }
}

pub(crate) fn festival(
    ctx: &ObservanceContext<'_>,
    summary: &str,
    what: &str,
    date: NaiveDate,
) -> Event {
    Event::all_day(EventCategory::Festival, summary, describe(ctx, what), date)
}

const GUDI_PADWA: MonthlyTithi =
    MonthlyTithi::at_sunrise(Masa::Chaitra, 1, "Gudi Padwa (Maharashtra New Year)");
const HANUMAN_JAYANTI: MonthlyTithi =
    MonthlyTithi::at_sunrise(Masa::Chaitra, 15, "Hanuman Jayanti");
const AKSHAYA_TRITIYA: MonthlyTithi =
    MonthlyTithi::at_sunrise(Masa::Vaisakha, 3, "Akshaya Tritiya");
const NAG_PANCHAMI: MonthlyTithi = MonthlyTithi::at_sunrise(Masa::Shravana, 5, "Nag Panchami");
const RAKSHA_BANDHAN: MonthlyTithi =
    MonthlyTithi::at_sunrise(Masa::Shravana, 15, "Raksha Bandhan");
const GANESH_CHATURTHI: MonthlyTithi = MonthlyTithi::at_sunrise(
    Masa::Bhadrapada,
    4,
    "Ganesh Chaturthi / Vinayaka Chaturthi",
);
const GURU_NANAK_JAYANTI: MonthlyTithi =
    MonthlyTithi::at_sunrise(Masa::Kartika, 15, "Guru Nanak Jayanti");

const KARWA_CHAUTH: MonthlyTithi = MonthlyTithi {
    masa: Masa::Ashwin,
    tithi: 19,
    summary: "Karwa Chauth",
    strategy: &[&[Probe::Moonrise, Probe::Hours(15..=23)]],
    timing: Some("at moonrise or in the evening"),
};

const MAHASHIVRATRI: MonthlyTithi = MonthlyTithi {
    masa: Masa::Phalguna,
    tithi: 29,
    summary: "Mahashivratri",
    strategy: &[
        &[Probe::LocalClock { hour: 20, minute: 0 }],
        &[Probe::Hours(18..=23)],
    ],
    timing: Some("at night"),
};

const HOLIKA_DAHAN: MonthlyTithi = MonthlyTithi {
    masa: Masa::Phalguna,
    tithi: 15,
    summary: "Holika Dahan",
    strategy: &[&[Probe::Sunset, Probe::Hours(17..=23)]],
    timing: Some("at sunset or in the evening"),
};

const JANMASHTAMI: MonthlyTithi = MonthlyTithi {
    masa: Masa::Shravana,
    tithi: 23,
    summary: "Krishna Janmashtami",
    strategy: &[
        &[Probe::LocalClock { hour: 23, minute: 30 }],
        &[Probe::Sunrise],
        &[Probe::ALL_HOURS],
    ],
    timing: Some("near midnight"),
};

pub fn gudi_padwa(ctx: &ObservanceContext<'_>) -> Result<Vec<Event>, SearchError> {
    GUDI_PADWA.evaluate(ctx)
}

pub fn hanuman_jayanti(ctx: &ObservanceContext<'_>) -> Result<Vec<Event>, SearchError> {
    HANUMAN_JAYANTI.evaluate(ctx)
}

pub fn akshaya_tritiya(ctx: &ObservanceContext<'_>) -> Result<Vec<Event>, SearchError> {
    AKSHAYA_TRITIYA.evaluate(ctx)
}

pub fn nag_panchami(ctx: &ObservanceContext<'_>) -> Result<Vec<Event>, SearchError> {
    NAG_PANCHAMI.evaluate(ctx)
}

pub fn raksha_bandhan(ctx: &ObservanceContext<'_>) -> Result<Vec<Event>, SearchError> {
    RAKSHA_BANDHAN.evaluate(ctx)
}

pub fn ganesh_chaturthi(ctx: &ObservanceContext<'_>) -> Result<Vec<Event>, SearchError> {
    GANESH_CHATURTHI.evaluate(ctx)
}

pub fn guru_nanak_jayanti(ctx: &ObservanceContext<'_>) -> Result<Vec<Event>, SearchError> {
    GURU_NANAK_JAYANTI.evaluate(ctx)
}

pub fn karwa_chauth(ctx: &ObservanceContext<'_>) -> Result<Vec<Event>, SearchError> {
    KARWA_CHAUTH.evaluate(ctx)
}

pub fn mahashivratri(ctx: &ObservanceContext<'_>) -> Result<Vec<Event>, SearchError> {
    MAHASHIVRATRI.evaluate(ctx)
}

pub fn janmashtami(ctx: &ObservanceContext<'_>) -> Result<Vec<Event>, SearchError> {
    JANMASHTAMI.evaluate(ctx)
}

/// Holika Dahan on the Purnima evening, Dhulandi the day after.
pub fn holi(ctx: &ObservanceContext<'_>) -> Result<Vec<Event>, SearchError> {
    let Some((date, _)) = HOLIKA_DAHAN.find(ctx)? else {
        return Ok(Vec::new());
    };
    let mut out = vec![HOLIKA_DAHAN.event(ctx, date)];
    if let Some(next) = date.succ_opt() {
        out.push(festival(ctx, "Holi (Dhulandi)", "Day after Holika Dahan", next));
    }
    Ok(out)
}

/// Hartalika Teej: the day before Ganesh Chaturthi when it holds tithi 3,
/// otherwise the first tithi 3 of Bhadrapada.
pub fn hartalika_teej(ctx: &ObservanceContext<'_>) -> Result<Vec<Event>, SearchError> {
    const SUMMARY: &str = "Hartalika Teej";
    const WHAT: &str = "Bhadrapada Shukla Tritiya at sunrise";

    if let Some((ganesh, _)) = GANESH_CHATURTHI.find(ctx)? {
        if let Some(eve) = ganesh.pred_opt() {
            if ctx.find_in_window(eve, eve, 3, SUNRISE_THEN_HOURLY)?.is_some() {
                return Ok(vec![festival(ctx, SUMMARY, WHAT, eve)]);
            }
            tracing::debug!(%eve, "eve of Ganesh Chaturthi is not tithi 3");
        }
    }
    Ok(ctx
        .find_in_masa(Masa::Bhadrapada, 3, SUNRISE_THEN_HOURLY)?
        .map(|(date, _)| festival(ctx, SUMMARY, WHAT, date))
        .into_iter()
        .collect())
}

/// Hariyali Teej: tithi 3 in the month before Ganesh Chaturthi's.
pub fn hariyali_teej(ctx: &ObservanceContext<'_>) -> Result<Vec<Event>, SearchError> {
    let anchor = match GANESH_CHATURTHI.find(ctx)? {
        Some((_, idx)) => Some(idx),
        None => ctx.intervals_named(Masa::Bhadrapada).next().map(|(i, _)| i),
    };
    let Some(prev) = anchor.and_then(|i| i.checked_sub(1)) else {
        return Ok(Vec::new());
    };
    let iv = &ctx.intervals[prev];
    let Some((first, last)) = ctx.interval_window(iv) else {
        return Ok(Vec::new());
    };
    let what = format!("{} Shukla Tritiya at sunrise", iv.masa);
    Ok(ctx
        .find_tithi_day(first, last, 3, SUNRISE_THEN_HOURLY)?
        .map(|date| festival(ctx, "Hariyali Teej", &what, date))
        .into_iter()
        .collect())
}

/// Pitru Paksha: first Krishna Pratipada of Bhadrapada to the Amavasya
/// closing it.
pub fn pitru_paksha(ctx: &ObservanceContext<'_>) -> Result<Vec<Event>, SearchError> {
    let Some((start, idx)) = ctx.find_in_masa(Masa::Bhadrapada, 16, SUNRISE_THEN_HOURLY)? else {
        return Ok(Vec::new());
    };
    let mut out = vec![festival(
        ctx,
        "Pitru Paksha begins",
        "Bhadrapada Krishna Pratipada at sunrise",
        start,
    )];
    let last = ctx
        .interval_window(&ctx.intervals[idx])
        .map(|(_, last)| last)
        .unwrap_or(start);
    if let Some(end) = ctx.find_in_window(start, last, 30, SUNRISE_THEN_HOURLY)? {
        out.push(festival(
            ctx,
            "Pitru Paksha ends (Sarva Pitru Amavasya)",
            "Bhadrapada Amavasya at sunrise",
            end,
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptions_name_month_and_tithi() {
        assert_eq!(GUDI_PADWA.what(), "Chaitra Shukla Pratipada at sunrise");
        assert_eq!(KARWA_CHAUTH.what(), "Ashwin Krishna Chaturthi at moonrise or in the evening");
        assert_eq!(MAHASHIVRATRI.what(), "Phalguna Krishna Chaturdashi at night");
    }
}
