//! Plain-text and JSON renderings of an event set.

use serde::Serialize;
use vrat_search::{Event, EventSet, EventTiming};

#[derive(Serialize)]
struct JsonEvent<'a> {
    uid: String,
    #[serde(flatten)]
    event: &'a Event,
}

/// Pretty JSON array; every element carries its stable identifier.
pub fn json(events: &EventSet) -> serde_json::Result<String> {
    let rows: Vec<JsonEvent<'_>> = events
        .iter()
        .map(|event| JsonEvent {
            uid: event.stable_uid(),
            event,
        })
        .collect();
    serde_json::to_string_pretty(&rows)
}

/// One line per event: date, local time span for timed events, summary.
pub fn text(events: &EventSet) -> String {
    let mut out = String::new();
    for event in events {
        let when = match &event.timing {
            EventTiming::AllDay { date } => format!("{date}"),
            EventTiming::Timed { start, end } => format!(
                "{} {}-{} {}",
                start.date_naive(),
                start.format("%H:%M"),
                end.format("%H:%M"),
                start.format("%:z")
            ),
        };
        out.push_str(&format!("{when:<30} {}\n", event.summary));
    }
    out
}
