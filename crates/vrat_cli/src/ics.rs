//! iCalendar (RFC 5545) serialisation of an event set.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use vrat_search::{Event, EventSet, EventTiming};

pub const PRODID: &str = "-//vrat//Location-aware Hindu calendar//EN";
pub const DEFAULT_CALNAME: &str = "Hindu Calendar";

/// Content lines are folded at this many octets, CRLF excluded.
const MAX_LINE_OCTETS: usize = 75;

#[derive(Debug, Clone)]
pub struct IcsOptions<'a> {
    /// `X-WR-CALNAME`.
    pub calname: &'a str,
    /// `X-WR-TIMEZONE`, omitted when `None`.
    pub tzid: Option<&'a str>,
    /// `DTSTAMP` of every event.
    pub stamp: DateTime<Utc>,
}

/// Escape TEXT values: backslash, semicolon, comma and newlines.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}

/// Fold one content line, never splitting a UTF-8 sequence.
#[must_use]
pub fn fold_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut width = 0;
    for ch in line.chars() {
        let len = ch.len_utf8();
        if width + len > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(ch);
        width += len;
    }
    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(&fold_line(line));
    out.push_str("\r\n");
}

fn fmt_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

fn fmt_utc(at: DateTime<Utc>) -> String {
    at.format("%Y%m%dT%H%M%SZ").to_string()
}

fn push_event(out: &mut String, event: &Event, stamp: &str) {
    push_line(out, "BEGIN:VEVENT");
    push_line(out, &format!("UID:{}", event.stable_uid()));
    push_line(out, &format!("DTSTAMP:{stamp}"));
    match &event.timing {
        EventTiming::AllDay { date } => {
            push_line(out, &format!("DTSTART;VALUE=DATE:{}", fmt_date(*date)));
            let next = *date + TimeDelta::days(1);
            push_line(out, &format!("DTEND;VALUE=DATE:{}", fmt_date(next)));
        }
        EventTiming::Timed { start, end } => {
            push_line(out, &format!("DTSTART:{}", fmt_utc(start.to_utc())));
            push_line(out, &format!("DTEND:{}", fmt_utc(end.to_utc())));
        }
    }
    push_line(out, &format!("SUMMARY:{}", escape_text(&event.summary)));
    push_line(out, &format!("DESCRIPTION:{}", escape_text(&event.description)));
    push_line(out, "TRANSP:TRANSPARENT");
    push_line(out, "END:VEVENT");
}

/// Render a complete VCALENDAR document with CRLF line endings.
pub fn render(events: &EventSet, options: &IcsOptions<'_>) -> String {
    let stamp = fmt_utc(options.stamp);
    let mut out = String::new();
    push_line(&mut out, "BEGIN:VCALENDAR");
    push_line(&mut out, &format!("PRODID:{PRODID}"));
    push_line(&mut out, "VERSION:2.0");
    push_line(&mut out, "CALSCALE:GREGORIAN");
    push_line(&mut out, &format!("X-WR-CALNAME:{}", escape_text(options.calname)));
    if let Some(tzid) = options.tzid {
        push_line(&mut out, &format!("X-WR-TIMEZONE:{tzid}"));
    }
    for event in events {
        push_event(&mut out, event, &stamp);
    }
    push_line(&mut out, "END:VCALENDAR");
    out
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use vrat_search::EventCategory;

    use super::*;

    fn sample() -> EventSet {
        let ist = FixedOffset::east_opt(19_800).unwrap();
        let start = ist.with_ymd_and_hms(2025, 3, 20, 7, 30, 0).unwrap();
        EventSet::from_events(vec![
            Event::all_day(
                EventCategory::Festival,
                "Gudi Padwa",
                "Chaitra Shukla Pratipada at sunrise (Asia/Kolkata).",
                NaiveDate::from_ymd_opt(2025, 3, 30).unwrap(),
            ),
            Event::timed(
                EventCategory::RahuKaal,
                "Rahu Kaal",
                "Day divided into eight parts; weekday segment 6 of 8 (Asia/Kolkata).",
                start,
                start + TimeDelta::minutes(90),
            ),
        ])
    }

    fn options(tzid: Option<&str>) -> IcsOptions<'_> {
        IcsOptions {
            calname: DEFAULT_CALNAME,
            tzid,
            stamp: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn escapes_text_specials() {
        assert_eq!(escape_text("a,b;c\\d\ne"), "a\\,b\\;c\\\\d\\ne");
        assert_eq!(escape_text("line\r\nnext"), "line\\nnext");
    }

    #[test]
    fn folds_ascii_at_75_octets() {
        let line = format!("DESCRIPTION:{}", "x".repeat(200));
        let folded = fold_line(&line);
        for physical in folded.split("\r\n") {
            assert!(physical.len() <= 75, "{} octets", physical.len());
        }
        assert_eq!(folded.replace("\r\n ", ""), line);
    }

    #[test]
    fn folding_keeps_multibyte_chars_whole() {
        let line = format!("SUMMARY:{}", "ā".repeat(80));
        let folded = fold_line(&line);
        for physical in folded.split("\r\n") {
            assert!(physical.len() <= 75);
        }
        assert_eq!(folded.replace("\r\n ", ""), line);
    }

    #[test]
    fn short_lines_untouched() {
        assert_eq!(fold_line("VERSION:2.0"), "VERSION:2.0");
    }

    #[test]
    fn calendar_structure() {
        let ics = render(&sample(), &options(Some("Asia/Kolkata")));
        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert!(ics.contains("X-WR-CALNAME:Hindu Calendar\r\n"));
        assert!(ics.contains("X-WR-TIMEZONE:Asia/Kolkata\r\n"));
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        assert!(!ics.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn timezone_header_optional() {
        let ics = render(&sample(), &options(None));
        assert!(!ics.contains("X-WR-TIMEZONE"));
    }

    #[test]
    fn all_day_ends_next_day_and_timed_in_utc() {
        let ics = render(&sample(), &options(None));
        assert!(ics.contains("DTSTART;VALUE=DATE:20250330\r\n"));
        assert!(ics.contains("DTEND;VALUE=DATE:20250331\r\n"));
        assert!(ics.contains("DTSTART:20250320T020000Z\r\n"));
        assert!(ics.contains("DTEND:20250320T033000Z\r\n"));
    }

    #[test]
    fn uids_are_stable() {
        let set = sample();
        let a = render(&set, &options(None));
        let b = render(&sample(), &options(None));
        assert_eq!(a, b);
        for event in &set {
            assert!(a.contains(&format!("UID:{}\r\n", event.stable_uid())));
        }
    }
}
