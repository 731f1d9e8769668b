//! Calendar events and ordered, deduplicated event sets.

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat};
use serde::Serialize;
use uuid::Uuid;

/// Namespace for event identifiers.
const UID_NAMESPACE: Uuid = Uuid::from_bytes([
    0x6f, 0x1c, 0x52, 0x9e, 0x0b, 0x3d, 0x5a, 0x41, 0x9d, 0x27, 0x84, 0xc2, 0x1e, 0x70, 0xa3, 0x55,
]);

/// Suffix appended to every identifier.
pub const UID_DOMAIN: &str = "vrat";

/// Output category, used for inclusion flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Ekadashi,
    Sankashti,
    AmavasyaPurnima,
    Festival,
    RahuKaal,
}

/// All-day date or a timed `[start, end)` span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventTiming {
    AllDay {
        date: NaiveDate,
    },
    Timed {
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub summary: String,
    pub description: String,
    pub category: EventCategory,
    #[serde(flatten)]
    pub timing: EventTiming,
}

impl Event {
    pub fn all_day(
        category: EventCategory,
        summary: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            summary: summary.into(),
            description: description.into(),
            category,
            timing: EventTiming::AllDay { date },
        }
    }

    pub fn timed(
        category: EventCategory,
        summary: impl Into<String>,
        description: impl Into<String>,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            summary: summary.into(),
            description: description.into(),
            category,
            timing: EventTiming::Timed { start, end },
        }
    }

    /// Intrinsic date: the all-day date, or the start's local date.
    pub fn date(&self) -> NaiveDate {
        match &self.timing {
            EventTiming::AllDay { date } => *date,
            EventTiming::Timed { start, .. } => start.date_naive(),
        }
    }

    /// Local time of day; all-day events sort as 00:00.
    pub fn time_of_day(&self) -> NaiveTime {
        match &self.timing {
            EventTiming::AllDay { .. } => NaiveTime::MIN,
            EventTiming::Timed { start, .. } => start.time(),
        }
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self.timing, EventTiming::AllDay { .. })
    }

    /// Identity key `(summary, date)`.
    pub fn identity(&self) -> (&str, NaiveDate) {
        (&self.summary, self.date())
    }

    /// Deterministic identifier for calendar serialisers.
    pub fn stable_uid(&self) -> String {
        let key = match &self.timing {
            EventTiming::AllDay { date } => format!("{}|{}|ALLDAY", self.summary, date),
            EventTiming::Timed { start, end } => format!(
                "{}|{}|{}",
                self.summary,
                start.to_rfc3339_opts(SecondsFormat::Secs, false),
                end.to_rfc3339_opts(SecondsFormat::Secs, false)
            ),
        };
        format!("{}@{UID_DOMAIN}", Uuid::new_v5(&UID_NAMESPACE, key.as_bytes()))
    }
}

/// Events ordered by `(date, time of day)` with unique identity keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EventSet {
    events: Vec<Event>,
}

impl EventSet {
    /// Sort stably and drop later duplicates of an identity key.
    pub fn from_events(mut events: Vec<Event>) -> Self {
        events.sort_by_key(|e| (e.date(), e.time_of_day()));
        let mut seen: HashSet<(String, NaiveDate)> = HashSet::with_capacity(events.len());
        events.retain(|e| seen.insert((e.summary.clone(), e.date())));
        Self { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// Events of one category, in order.
    pub fn of_category(&self, category: EventCategory) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.category == category)
    }
}

impl<'a> IntoIterator for &'a EventSet {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
