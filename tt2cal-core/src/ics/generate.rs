//! ICS artifact generation.
//!
//! One VEVENT per calendar block, timezone-qualified, with a weekly RRULE
//! carrying the interval and occurrence count computed by the expander.
//! Output is deterministic for a given input so repeated exports of the
//! same timetable are byte-identical.

use icalendar::{Calendar, Component, EventLike, Property};

use crate::entry::Timetable;
use crate::error::{TtCalError, TtCalResult};
use crate::expand::CalendarBlock;

/// Generate the .ics artifact for a timetable's expanded blocks.
pub fn generate_ics(
    timetable: &Timetable,
    blocks: &[CalendarBlock],
    timezone: &str,
) -> TtCalResult<String> {
    // Fail early on a timezone no calendar application will recognize.
    timezone
        .parse::<chrono_tz::Tz>()
        .map_err(|_| TtCalError::IcsGenerate(format!("Unknown timezone '{timezone}'")))?;

    let student = timetable.student_name.as_deref().unwrap_or("Student");
    let term = timetable.term.as_deref().unwrap_or("Academic");

    let mut cal = Calendar::new();
    // X-WR-* calendar metadata (de facto standard, honored by importers)
    cal.append_property(Property::new(
        "X-WR-CALNAME",
        format!("{student} Timetable"),
    ));
    cal.append_property(Property::new("X-WR-CALDESC", format!("{term} Timetable")));
    cal.append_property(Property::new("X-WR-TIMEZONE", timezone));

    for block in blocks {
        let mut event = icalendar::Event::new();
        event.uid(&block.uid);
        event.summary(&block.summary);
        event.description(&block.description);
        if !block.location.is_empty() {
            event.location(&block.location);
        }

        // DTSTAMP is required by RFC 5545; deriving it from the first
        // occurrence keeps the artifact reproducible.
        event.add_property(
            "DTSTAMP",
            block.start.format("%Y%m%dT%H%M%SZ").to_string(),
        );

        add_zoned_property(&mut event, "DTSTART", block, timezone, true);
        add_zoned_property(&mut event, "DTEND", block, timezone, false);

        event.add_property(
            "RRULE",
            format!("FREQ=WEEKLY;INTERVAL={};COUNT={}", block.interval, block.count),
        );

        cal.push(event.done());
    }

    Ok(strip_ics_bloat(&cal.done().to_string()))
}

fn add_zoned_property(
    event: &mut icalendar::Event,
    name: &str,
    block: &CalendarBlock,
    tzid: &str,
    start: bool,
) {
    let datetime = if start { block.start } else { block.end };
    let mut prop = Property::new(name, datetime.format("%Y%m%dT%H%M%S").to_string());
    prop.add_parameter("TZID", tzid);
    event.append_property(prop);
}

/// Clean up ICS output from the icalendar crate:
/// - replace PRODID with TT2CAL
/// - drop CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:TT2CAL\r\n");
            continue;
        }
        if line == "CALSCALE:GREGORIAN" {
            continue;
        }
        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
