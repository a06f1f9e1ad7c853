//! Feed parsing using the icalendar crate's parser.
//!
//! Folded continuation lines are unfolded before property parsing, and only
//! VEVENTs carrying a UID are kept. Date values stay unparsed strings here;
//! `parse_feed_datetime` is the one place that interprets them.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use icalendar::parser::{read_calendar, unfold, Component};

use crate::error::{ChoreBoardError, ChoreBoardResult};
use crate::event::RawFeedEvent;

/// Parse an iCalendar document into raw feed events.
///
/// Events without a UID are skipped. Date properties are carried through as
/// raw strings so the normalizer can decide how to treat unparseable ones.
pub fn parse_feed(content: &str) -> ChoreBoardResult<Vec<RawFeedEvent>> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded)
        .map_err(|e| ChoreBoardError::FeedParse(format!("Not an iCalendar document: {}", e)))?;

    let events = calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .filter_map(to_raw_event)
        .collect();

    Ok(events)
}

fn to_raw_event(vevent: &Component) -> Option<RawFeedEvent> {
    // Events without a UID can't be tracked across syncs; drop them.
    let uid = vevent.find_prop("UID")?.val.to_string();

    let prop = |name: &str| vevent.find_prop(name).map(|p| p.val.to_string());

    let start = prop("DTSTART");
    let all_day = start.as_deref().is_some_and(is_date_only);

    let categories = prop("CATEGORIES")
        .map(|v| {
            v.split(',')
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect()
        })
        .unwrap_or_default();

    Some(RawFeedEvent {
        uid,
        summary: prop("SUMMARY"),
        description: prop("DESCRIPTION"),
        location: prop("LOCATION"),
        start,
        end: prop("DTEND"),
        all_day,
        categories,
    })
}

/// Whether an iCalendar date value is date-only (no time-of-day component).
pub fn is_date_only(value: &str) -> bool {
    !value.contains('T')
}

/// Parse an iCalendar date value into a UTC instant.
///
/// A trailing `Z` is stripped and all components are interpreted as UTC.
/// Date-only values resolve to midnight UTC.
pub fn parse_feed_datetime(value: &str) -> ChoreBoardResult<DateTime<Utc>> {
    let trimmed = value.trim().trim_end_matches('Z');

    let parsed = if trimmed.contains('T') {
        NaiveDateTime::parse_from_str(trimmed, "%Y%m%dT%H%M%S").map(|dt| dt.and_utc())
    } else {
        NaiveDate::parse_from_str(trimmed, "%Y%m%d")
            .map(|d| d.and_hms_opt(0, 0, 0).unwrap().and_utc())
    };

    parsed.map_err(|_| ChoreBoardError::FeedParse(format!("Invalid date value '{}'", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    const FEED: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:TEST\r\n\
BEGIN:VEVENT\r\n\
UID:evt-1\r\n\
SUMMARY:Soccer practice\r\n\
DTSTART:20240108T150000Z\r\n\
DTEND:20240108T160000Z\r\n\
LOCATION:City field\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:evt-2\r\n\
SUMMARY:Grandma visit\r\n\
DTSTART;VALUE=DATE:20240110\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:No uid here\r\n\
DTSTART:20240111T100000Z\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    #[test]
    fn keeps_only_events_with_uid() {
        let events = parse_feed(FEED).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].uid, "evt-1");
        assert_eq!(events[1].uid, "evt-2");
    }

    #[test]
    fn date_only_start_marks_all_day() {
        let events = parse_feed(FEED).unwrap();
        assert!(!events[0].all_day);
        assert!(events[1].all_day);
    }

    #[test]
    fn unfolds_continuation_lines() {
        let feed = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:evt-1\r\n\
SUMMARY:Dentist\r\n\
DESCRIPTION:Bring the in\r\n surance card\r\n\
DTSTART:20240108T150000Z\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let events = parse_feed(feed).unwrap();
        assert_eq!(
            events[0].description.as_deref(),
            Some("Bring the insurance card")
        );
    }

    #[test]
    fn splits_categories() {
        let feed = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:evt-1\r\n\
SUMMARY:Recital\r\n\
DTSTART:20240108T150000Z\r\n\
CATEGORIES:music, family\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let events = parse_feed(feed).unwrap();
        assert_eq!(events[0].categories, vec!["music", "family"]);
    }

    // --- parse_feed_datetime ---

    #[test]
    fn parses_utc_datetime_and_strips_z() {
        let dt = parse_feed_datetime("20240108T153000Z").unwrap();
        assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        assert_eq!((dt.hour(), dt.minute()), (15, 30));
    }

    #[test]
    fn parses_floating_datetime_as_utc() {
        let with_z = parse_feed_datetime("20240108T153000Z").unwrap();
        let without_z = parse_feed_datetime("20240108T153000").unwrap();
        assert_eq!(with_z, without_z);
    }

    #[test]
    fn parses_date_only_as_midnight_utc() {
        let dt = parse_feed_datetime("20240110").unwrap();
        assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (0, 0, 0));
    }

    #[test]
    fn rejects_garbage_dates() {
        assert!(parse_feed_datetime("not-a-date").is_err());
        assert!(parse_feed_datetime("2024-01-08").is_err());
        assert!(parse_feed_datetime("20241350").is_err());
    }
}
