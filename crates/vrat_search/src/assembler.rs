//! Event assembly: selection, ordering, deduplication and viewer-timezone
//! coalescing of Rahu Kaal.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use chrono::NaiveDate;
use vrat_base::{AyanamshaModel, parse_zone};

use crate::context::Tradition;
use crate::error::SearchError;
use crate::event::{Event, EventCategory, EventSet, EventTiming};
use crate::rules::{ALL_OBSERVANCES, Observance};

/// Per-category inclusion switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryFlags {
    pub ekadashi: bool,
    pub sankashti: bool,
    pub amavasya_purnima: bool,
    pub festivals: bool,
    pub rahu_kaal: bool,
}

impl Default for CategoryFlags {
    fn default() -> Self {
        Self {
            ekadashi: true,
            sankashti: true,
            amavasya_purnima: true,
            festivals: true,
            rahu_kaal: true,
        }
    }
}

impl CategoryFlags {
    pub fn includes(&self, category: EventCategory) -> bool {
        match category {
            EventCategory::Ekadashi => self.ekadashi,
            EventCategory::Sankashti => self.sankashti,
            EventCategory::AmavasyaPurnima => self.amavasya_purnima,
            EventCategory::Festival => self.festivals,
            EventCategory::RahuKaal => self.rahu_kaal,
        }
    }
}

/// Festival allowlist.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FestivalSelection {
    #[default]
    All,
    Only(BTreeSet<Observance>),
}

impl FestivalSelection {
    pub fn includes(&self, observance: Observance) -> bool {
        match self {
            Self::All => true,
            Self::Only(set) => set.contains(&observance),
        }
    }
}

impl FromStr for FestivalSelection {
    type Err = SearchError;

    /// `"all"` or a comma-separated list of festival keys.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        let mut set = BTreeSet::new();
        for key in s.split(',').map(str::trim).filter(|k| !k.is_empty()) {
            let observance: Observance = key.parse()?;
            if !observance.is_festival() {
                return Err(SearchError::UnknownFestival(key.to_string()));
            }
            set.insert(observance);
        }
        Ok(Self::Only(set))
    }
}

/// What to compute and how.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssemblyOptions {
    pub tradition: Tradition,
    pub categories: CategoryFlags,
    pub festivals: FestivalSelection,
    pub ayanamsha: AyanamshaModel,
}

impl AssemblyOptions {
    /// Rules to run, all-day categories before festivals, in registry order.
    pub fn selected_rules(&self) -> Vec<Observance> {
        ALL_OBSERVANCES
            .into_iter()
            .filter(|o| self.categories.includes(o.category()))
            .filter(|o| !o.is_festival() || self.festivals.includes(*o))
            .collect()
    }
}

/// Merge all-day events and timed events into one ordered set.
///
/// All-day events are placed first so that they win identity conflicts.
pub fn assemble(all_day: Vec<Event>, timed: Vec<Event>) -> EventSet {
    let mut events = all_day;
    events.extend(timed);
    EventSet::from_events(events)
}

/// Output of viewer-timezone coalescing.
#[derive(Debug, Clone, PartialEq)]
pub struct Coalesced {
    pub events: EventSet,
    /// Why coalescing was not applied, if it was not.
    pub skipped: Option<SearchError>,
}

fn is_timed_rahu_kaal(e: &Event) -> bool {
    e.category == EventCategory::RahuKaal && !e.is_all_day()
}

/// Keep one Rahu Kaal event per viewer-local date: the latest start.
///
/// An unparseable label leaves the set unchanged and reports the reason.
pub fn coalesce_rahu_kaal(set: EventSet, viewer_tz: &str) -> Coalesced {
    let tz = match parse_zone(viewer_tz) {
        Ok(tz) => tz,
        Err(_) => {
            tracing::warn!(label = viewer_tz, "viewer timezone invalid, coalescing skipped");
            return Coalesced {
                events: set,
                skipped: Some(SearchError::InvalidTimeZoneLabel(viewer_tz.to_string())),
            };
        }
    };

    let (rahu, mut others): (Vec<Event>, Vec<Event>) =
        set.into_events().into_iter().partition(is_timed_rahu_kaal);
    let before = rahu.len();

    let mut by_viewer_date: BTreeMap<NaiveDate, Event> = BTreeMap::new();
    for e in rahu {
        let EventTiming::Timed { start, .. } = e.timing else {
            continue;
        };
        let date = start.with_timezone(&tz).date_naive();
        let later = by_viewer_date
            .get(&date)
            .is_none_or(|kept| kept_start(kept) < Some(start));
        if later {
            by_viewer_date.insert(date, e);
        }
    }
    tracing::debug!(
        before,
        after = by_viewer_date.len(),
        viewer_tz,
        "Rahu Kaal coalesced"
    );

    others.extend(by_viewer_date.into_values());
    Coalesced {
        events: EventSet::from_events(others),
        skipped: None,
    }
}

fn kept_start(e: &Event) -> Option<chrono::DateTime<chrono::FixedOffset>> {
    match e.timing {
        EventTiming::Timed { start, .. } => Some(start),
        EventTiming::AllDay { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone};

    use super::*;

    fn at(offset_h: i32, d: u32, h: u32, mi: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(offset_h * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 3, d, h, mi, 0)
            .unwrap()
    }

    fn rahu(start: DateTime<FixedOffset>) -> Event {
        Event::timed(
            EventCategory::RahuKaal,
            "Rahu Kaal",
            "",
            start,
            start + TimeDelta::minutes(90),
        )
    }

    #[test]
    fn selection_parse() {
        assert_eq!("ALL".parse::<FestivalSelection>(), Ok(FestivalSelection::All));
        let sel: FestivalSelection = "diwali, holi".parse().unwrap();
        assert!(sel.includes(Observance::Diwali));
        assert!(sel.includes(Observance::Holi));
        assert!(!sel.includes(Observance::GudiPadwa));
        assert_eq!(
            "diwali,onam".parse::<FestivalSelection>(),
            Err(SearchError::UnknownFestival("onam".into()))
        );
        assert!(matches!(
            "ekadashi".parse::<FestivalSelection>(),
            Err(SearchError::UnknownFestival(_))
        ));
    }

    #[test]
    fn selected_rules_respect_flags() {
        let opts = AssemblyOptions {
            categories: CategoryFlags {
                sankashti: false,
                ..Default::default()
            },
            festivals: "diwali".parse().unwrap(),
            ..Default::default()
        };
        assert_eq!(
            opts.selected_rules(),
            vec![
                Observance::Ekadashi,
                Observance::AmavasyaPurnima,
                Observance::Diwali
            ]
        );
    }

    #[test]
    fn coalesce_keeps_latest_per_viewer_date() {
        // source windows on consecutive days; in UTC−10 both start on Mar 20
        let set = EventSet::from_events(vec![
            rahu(at(5, 20, 16, 30)),
            rahu(at(5, 21, 7, 30)),
            Event::all_day(
                EventCategory::Festival,
                "X",
                "",
                NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
            ),
        ]);
        let out = coalesce_rahu_kaal(set, "Pacific/Honolulu");
        assert!(out.skipped.is_none());
        let rahu: Vec<_> = out.events.of_category(EventCategory::RahuKaal).collect();
        assert_eq!(rahu.len(), 1);
        assert_eq!(kept_start(rahu[0]), Some(at(5, 21, 7, 30)));
        assert_eq!(out.events.len(), 2);
    }

    #[test]
    fn invalid_label_returns_input() {
        let set = EventSet::from_events(vec![rahu(at(5, 20, 7, 30))]);
        let out = coalesce_rahu_kaal(set.clone(), "Not/AZone");
        assert_eq!(out.events, set);
        assert_eq!(
            out.skipped,
            Some(SearchError::InvalidTimeZoneLabel("Not/AZone".into()))
        );
    }
}
