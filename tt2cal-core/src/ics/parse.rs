//! ICS artifact parsing using the icalendar crate's parser.
//!
//! Only the fields the pipeline emits are recovered; this exists so the
//! artifact's fidelity can be checked by round-tripping, and so external
//! .ics files can be inspected.

use chrono::NaiveDateTime;
use icalendar::{DatePerhapsTime, parser::{read_calendar, unfold}};

use crate::error::{TtCalError, TtCalResult};

/// A recurring event read back from an .ics artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBlock {
    pub summary: String,
    pub location: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub interval: u32,
    pub count: u32,
}

/// Parse every VEVENT in `content` into a `ParsedBlock`.
pub fn parse_blocks(content: &str) -> TtCalResult<Vec<ParsedBlock>> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(TtCalError::IcsParse)?;

    let mut blocks = Vec::new();

    for vevent in calendar.components.iter().filter(|c| c.name == "VEVENT") {
        let summary = vevent
            .find_prop("SUMMARY")
            .map(|p| p.val.to_string())
            .unwrap_or_default();
        let location = vevent
            .find_prop("LOCATION")
            .map(|p| p.val.to_string())
            .unwrap_or_default();
        let description = vevent
            .find_prop("DESCRIPTION")
            .map(|p| unescape_text(p.val.as_ref()))
            .unwrap_or_default();

        let start = prop_datetime(vevent, "DTSTART").ok_or_else(|| {
            TtCalError::IcsParse(format!("VEVENT '{summary}' has no usable DTSTART"))
        })?;
        let end = prop_datetime(vevent, "DTEND").ok_or_else(|| {
            TtCalError::IcsParse(format!("VEVENT '{summary}' has no usable DTEND"))
        })?;

        let (interval, count) = vevent
            .find_prop("RRULE")
            .map(|p| parse_rrule(p.val.as_ref()))
            .unwrap_or((1, 0));

        blocks.push(ParsedBlock {
            summary,
            location,
            description,
            start,
            end,
            interval,
            count,
        });
    }

    Ok(blocks)
}

fn prop_datetime(
    vevent: &icalendar::parser::Component<'_>,
    name: &str,
) -> Option<NaiveDateTime> {
    let prop = vevent.find_prop(name)?;
    let dpt = DatePerhapsTime::try_from(prop).ok()?;
    match dpt {
        DatePerhapsTime::Date(d) => d.and_hms_opt(0, 0, 0),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            icalendar::CalendarDateTime::Utc(dt) => Some(dt.naive_utc()),
            icalendar::CalendarDateTime::Floating(naive) => Some(naive),
            icalendar::CalendarDateTime::WithTimezone { date_time, .. } => Some(date_time),
        },
    }
}

/// Pull INTERVAL and COUNT out of an RRULE value. Missing parts fall back
/// to INTERVAL=1 / COUNT=0.
fn parse_rrule(rrule: &str) -> (u32, u32) {
    let mut interval = 1;
    let mut count = 0;
    for part in rrule.split(';') {
        if let Some((key, val)) = part.split_once('=') {
            match key {
                "INTERVAL" => interval = val.parse().unwrap_or(1),
                "COUNT" => count = val.parse().unwrap_or(0),
                _ => {}
            }
        }
    }
    (interval, count)
}

/// Reverse RFC 5545 text escaping (DESCRIPTION newlines in particular).
fn unescape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(escaped) => out.push(escaped),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:TT2CAL\r\n\
BEGIN:VEVENT\r\nUID:abc@tt2cal\r\nDTSTAMP:20250106T080000Z\r\n\
DTSTART;TZID=Asia/Singapore:20250106T080000\r\n\
DTEND;TZID=Asia/Singapore:20250106T090000\r\n\
RRULE:FREQ=WEEKLY;INTERVAL=2;COUNT=20\r\n\
SUMMARY:MATH/S2-06\r\nLOCATION:S2-06\r\n\
DESCRIPTION:Subject: MATH\\nLocation: S2-06\r\n\
END:VEVENT\r\nEND:VCALENDAR\r\n";

    #[test]
    fn test_parse_emitted_shape() {
        let blocks = parse_blocks(SAMPLE).unwrap();
        assert_eq!(blocks.len(), 1);
        let block = &blocks[0];
        assert_eq!(block.summary, "MATH/S2-06");
        assert_eq!(block.location, "S2-06");
        assert_eq!(block.description, "Subject: MATH\nLocation: S2-06");
        assert_eq!(block.interval, 2);
        assert_eq!(block.count, 20);
        assert_eq!(
            block.start,
            chrono::NaiveDate::from_ymd_opt(2025, 1, 6)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_parse_rrule_defaults() {
        assert_eq!(parse_rrule("FREQ=WEEKLY"), (1, 0));
        assert_eq!(parse_rrule("FREQ=WEEKLY;INTERVAL=2;COUNT=20"), (2, 20));
    }

    #[test]
    fn test_unescape_text() {
        assert_eq!(unescape_text("a\\nb"), "a\nb");
        assert_eq!(unescape_text("a\\,b"), "a,b");
        assert_eq!(unescape_text("plain"), "plain");
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        assert!(parse_blocks("not a calendar").is_err());
    }
}
