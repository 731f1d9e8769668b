//! Ekadashi: tithi 11 (Shukla) or 26 (Krishna) at local sunrise.
//!
//! Smartha observes every date with Ekadashi at sunrise. Vaishnava observes
//! the same dates, and a date whose sunrise is not Ekadashi hands over to
//! the next date when that sunrise is.

use chrono::{NaiveDate, TimeDelta};
use vrat_base::{Masa, Paksha, paksha_for};

use crate::context::{DayOutcome, ObservanceContext, Tradition};
use crate::error::SearchError;
use crate::event::{Event, EventCategory};
use crate::rules::describe;
use crate::search_util::{days_between, year_bounds};

const SHUKLA_EKADASHI: u8 = 11;
const KRISHNA_EKADASHI: u8 = 26;

/// How a date was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    AtSunrise,
    /// Vaishnava: the previous sunrise was not Ekadashi, this one is.
    Shifted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EkadashiDay {
    date: NaiveDate,
    tithi: u8,
    selection: Selection,
}

/// Traditional name of the Ekadashi falling in an amanta month.
pub const fn ekadashi_name(masa: Masa, paksha: Paksha) -> &'static str {
    use Masa::*;
    match (masa, paksha) {
        (Chaitra, Paksha::Shukla) => "Kamada",
        (Chaitra, Paksha::Krishna) => "Varuthini",
        (Vaisakha, Paksha::Shukla) => "Mohini",
        (Vaisakha, Paksha::Krishna) => "Apara",
        (Jyeshtha, Paksha::Shukla) => "Nirjala",
        (Jyeshtha, Paksha::Krishna) => "Yogini",
        (Ashadha, Paksha::Shukla) => "Devshayani",
        (Ashadha, Paksha::Krishna) => "Kamika",
        (Shravana, Paksha::Shukla) => "Shravana Putrada",
        (Shravana, Paksha::Krishna) => "Aja",
        (Bhadrapada, Paksha::Shukla) => "Parivartini",
        (Bhadrapada, Paksha::Krishna) => "Indira",
        (Ashwin, Paksha::Shukla) => "Papankusha",
        (Ashwin, Paksha::Krishna) => "Rama",
        (Kartika, Paksha::Shukla) => "Prabodhini",
        (Kartika, Paksha::Krishna) => "Utpanna",
        (Margashirsha, Paksha::Shukla) => "Mokshada",
        (Margashirsha, Paksha::Krishna) => "Saphala",
        (Pausha, Paksha::Shukla) => "Pausha Putrada",
        (Pausha, Paksha::Krishna) => "Shattila",
        (Magha, Paksha::Shukla) => "Jaya",
        (Magha, Paksha::Krishna) => "Vijaya",
        (Phalguna, Paksha::Shukla) => "Amalaki",
        (Phalguna, Paksha::Krishna) => "Papamochani",
    }
}

fn is_ekadashi(tithi: u8) -> bool {
    tithi == SHUKLA_EKADASHI || tithi == KRISHNA_EKADASHI
}

fn summary(ctx: &ObservanceContext<'_>, date: NaiveDate, tithi: u8) -> String {
    let paksha = paksha_for(tithi);
    let suffix = match ctx.tradition {
        Tradition::Smartha => paksha.name().to_string(),
        Tradition::Vaishnava => format!("{}, Vaishnava", paksha.name()),
    };
    match ctx.masa_for(date) {
        Some(masa) => format!("{} Ekadashi ({suffix})", ekadashi_name(masa, paksha)),
        None => {
            tracing::warn!(%date, "no month name for Ekadashi, using plain label");
            format!("Ekadashi ({suffix})")
        }
    }
}

/// Ekadashi dates from consecutive sunrise tithis.
///
/// `sunrise_tithis[i]` is the tithi at the sunrise of `first + i`, `None`
/// for a skipped day. The last entry is only looked at by the Vaishnava
/// shift and never selected itself; the scan that starts there does that.
fn select_days(
    tradition: Tradition,
    first: NaiveDate,
    sunrise_tithis: &[Option<u8>],
) -> Vec<EkadashiDay> {
    let mut out: Vec<EkadashiDay> = Vec::new();
    let days = sunrise_tithis.len().saturating_sub(1);
    for i in 0..days {
        let date = first + TimeDelta::days(i as i64);
        match sunrise_tithis[i] {
            Some(tithi) if is_ekadashi(tithi) => {
                if out.last().is_some_and(|d| d.date == date) {
                    continue;
                }
                out.push(EkadashiDay {
                    date,
                    tithi,
                    selection: Selection::AtSunrise,
                });
            }
            Some(_) if tradition == Tradition::Vaishnava && i + 1 < days => {
                if let Some(tithi) = sunrise_tithis[i + 1].filter(|t| is_ekadashi(*t)) {
                    out.push(EkadashiDay {
                        date: date + TimeDelta::days(1),
                        tithi,
                        selection: Selection::Shifted,
                    });
                }
            }
            _ => {}
        }
    }
    out
}

fn describe_day(ctx: &ObservanceContext<'_>, day: &EkadashiDay) -> String {
    let t = day.tithi;
    let what = match (ctx.tradition, day.selection) {
        (Tradition::Smartha, _) => format!("Smartha: tithi {t} at sunrise"),
        (Tradition::Vaishnava, Selection::AtSunrise) => format!("Vaishnava: tithi {t} at sunrise"),
        (Tradition::Vaishnava, Selection::Shifted) => {
            format!("Vaishnava shift: tithi {t} at next sunrise")
        }
    };
    describe(ctx, &what)
}

/// Ekadashi dates of the context year for its tradition.
pub fn ekadashi_events(ctx: &ObservanceContext<'_>) -> Result<Vec<Event>, SearchError> {
    let Some((first, last)) = year_bounds(ctx.year) else {
        return Ok(Vec::new());
    };
    let mut sunrise_tithis = Vec::with_capacity(367);
    for date in days_between(first, last).chain(last.succ_opt()) {
        sunrise_tithis.push(match ctx.tithi_at_sunrise(date)? {
            DayOutcome::Hit(t) => Some(t),
            DayOutcome::Miss => None,
            DayOutcome::Skipped(reason) => {
                tracing::debug!(%date, ?reason, "Ekadashi day skipped");
                None
            }
        });
    }

    Ok(select_days(ctx.tradition, first, &sunrise_tithis)
        .iter()
        .map(|day| {
            Event::all_day(
                EventCategory::Ekadashi,
                summary(ctx, day.date, day.tithi),
                describe_day(ctx, day),
                day.date,
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_by_month_and_paksha() {
        assert_eq!(ekadashi_name(Masa::Chaitra, Paksha::Shukla), "Kamada");
        assert_eq!(ekadashi_name(Masa::Jyeshtha, Paksha::Shukla), "Nirjala");
        assert_eq!(ekadashi_name(Masa::Phalguna, Paksha::Krishna), "Papamochani");
    }

    #[test]
    fn both_pakshas_count() {
        assert!(is_ekadashi(11));
        assert!(is_ekadashi(26));
        assert!(!is_ekadashi(12));
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn dates(days: &[EkadashiDay]) -> Vec<NaiveDate> {
        days.iter().map(|day| day.date).collect()
    }

    #[test]
    fn smartha_keeps_both_sunrises_of_a_long_tithi() {
        // tithi 26 at the sunrises of 2020-06-16 and 2020-06-17
        let tithis = [Some(25), Some(26), Some(26), Some(27), Some(28)];
        let days = select_days(Tradition::Smartha, d(2020, 6, 15), &tithis);
        assert_eq!(dates(&days), [d(2020, 6, 16), d(2020, 6, 17)]);
        assert!(days.iter().all(|day| day.selection == Selection::AtSunrise));
    }

    #[test]
    fn vaishnava_shifts_only_from_a_non_ekadashi_sunrise() {
        let tithis = [Some(25), Some(26), Some(26), Some(27), Some(28)];
        let days = select_days(Tradition::Vaishnava, d(2020, 6, 15), &tithis);
        assert_eq!(dates(&days), [d(2020, 6, 16), d(2020, 6, 17)]);
        assert_eq!(days[0].selection, Selection::Shifted);
        assert_eq!(days[1].selection, Selection::AtSunrise);

        let tithis = [Some(10), Some(11), Some(12), Some(13)];
        let single = select_days(Tradition::Vaishnava, d(2025, 4, 6), &tithis);
        assert_eq!(dates(&single), [d(2025, 4, 7)]);
        assert_eq!(single[0].selection, Selection::Shifted);
    }

    #[test]
    fn skipped_sunrise_does_not_shift() {
        let tithis = [None, Some(11), Some(12)];
        let days = select_days(Tradition::Vaishnava, d(2025, 6, 20), &tithis);
        assert_eq!(dates(&days), [d(2025, 6, 21)]);
        assert_eq!(days[0].selection, Selection::AtSunrise);
    }

    #[test]
    fn year_boundary_ekadashi_belongs_to_the_year_it_falls_in() {
        // Dec 31 and Jan 1 both have tithi 11 at sunrise.
        for tradition in [Tradition::Smartha, Tradition::Vaishnava] {
            let tithis = [Some(10), Some(11), Some(11)];
            let old_year = select_days(tradition, d(2025, 12, 30), &tithis);
            assert_eq!(dates(&old_year), [d(2025, 12, 31)], "{tradition:?}");

            let tithis = [Some(11), Some(12), Some(13)];
            let new_year = select_days(tradition, d(2026, 1, 1), &tithis);
            assert_eq!(dates(&new_year), [d(2026, 1, 1)], "{tradition:?}");
        }
    }

    #[test]
    fn look_ahead_day_is_never_selected() {
        let days = select_days(Tradition::Vaishnava, d(2025, 12, 31), &[Some(10), Some(11)]);
        assert!(days.is_empty());
    }
}
