//! Recurrence expansion.
//!
//! Maps each normalized entry onto a concrete first occurrence and a weekly
//! recurrence rule. Every-week classes recur with interval 1; alternating
//! classes with interval 2, phase-anchored to the correct odd/even week via
//! the academic calendar. One unresolvable entry degrades to a warning, it
//! never fails the batch.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::academic::{AcademicCalendar, WeekParity};
use crate::constants::FULL_TERM_OCCURRENCES;
use crate::entry::{Entry, WeekType};
use crate::time::hhmm;

/// A calendar-ready recurring block, derived per normalized entry.
/// Not persisted; only serialized into the final artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarBlock {
    pub uid: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Weekly recurrence interval: 1 (every week) or 2 (alternating).
    pub interval: u32,
    pub count: u32,
    pub summary: String,
    pub location: String,
    pub description: String,
}

/// Expansion result: blocks plus per-entry warnings.
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    pub blocks: Vec<CalendarBlock>,
    pub warnings: Vec<String>,
}

/// Monday of the week containing `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

fn required_parity(week_type: WeekType) -> Option<WeekParity> {
    match week_type {
        WeekType::Odd => Some(WeekParity::Odd),
        WeekType::Even => Some(WeekParity::Even),
        WeekType::Both => None,
    }
}

/// Stable UID so re-running the pipeline over the same input emits a
/// byte-identical artifact.
fn block_uid(entry: &Entry) -> String {
    let name = format!(
        "tt2cal/{}/{}/{}/{}/{}",
        entry.day, entry.time_start, entry.time_end, entry.week_type, entry.title
    );
    let uuid = Uuid::new_v5(&Uuid::NAMESPACE_URL, name.as_bytes());
    format!("{uuid}@tt2cal")
}

/// Expand normalized entries into recurring calendar blocks, anchored at
/// the Monday of the week containing `start_date`.
pub fn expand_entries(
    entries: &[Entry],
    start_date: NaiveDate,
    calendar: &AcademicCalendar,
) -> Expansion {
    let anchor_monday = monday_of(start_date);

    let mut expansion = Expansion::default();

    for entry in entries {
        let (Some((sh, sm)), Some((eh, em))) = (hhmm(&entry.time_start), hhmm(&entry.time_end))
        else {
            expansion.warnings.push(format!(
                "Skipping '{}': unparseable time range {}-{}",
                entry.title, entry.time_start, entry.time_end
            ));
            continue;
        };

        // Alternating entries may need their anchor pushed to a week of
        // the right parity; every-week entries start at the anchor as-is.
        let mut week_shift = Duration::zero();
        let (interval, count) = match required_parity(entry.week_type) {
            None => (1, FULL_TERM_OCCURRENCES),
            Some(parity) => {
                match calendar.resolve(anchor_monday) {
                    Some(found) if found == parity => {}
                    Some(_) => match calendar.next_monday(parity, anchor_monday) {
                        Some((monday, _)) => week_shift = monday - anchor_monday,
                        None => expansion.warnings.push(format!(
                            "No {} week after {} in the published calendar; '{}' anchored at its original date",
                            parity.as_str(),
                            anchor_monday,
                            entry.title
                        )),
                    },
                    None => expansion.warnings.push(format!(
                        "Week parity for {} is unresolved; '{}' anchored at its original date",
                        anchor_monday, entry.title
                    )),
                }
                (2, FULL_TERM_OCCURRENCES / 2)
            }
        };

        let event_date = anchor_monday + week_shift + Duration::days(i64::from(entry.day.index()));
        // hhmm() guarantees in-range hours and minutes
        let start = event_date.and_hms_opt(sh, sm, 0).unwrap();
        let end = event_date.and_hms_opt(eh, em, 0).unwrap();

        expansion.blocks.push(CalendarBlock {
            uid: block_uid(entry),
            start,
            end,
            interval,
            count,
            summary: entry.title.clone(),
            location: entry.location.clone(),
            description: format!(
                "Subject: {}\nLocation: {}",
                entry.subject, entry.location
            ),
        });
    }

    expansion
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(day: Weekday, week: WeekType) -> Entry {
        Entry::new(day, "08:00", "09:00", "MATH", "S2-06", week)
    }

    #[test]
    fn test_monday_of() {
        assert_eq!(monday_of(date(2025, 1, 6)), date(2025, 1, 6));
        assert_eq!(monday_of(date(2025, 1, 9)), date(2025, 1, 6));
        assert_eq!(monday_of(date(2025, 1, 12)), date(2025, 1, 6));
    }

    #[test]
    fn test_both_week_entry_weekly_interval() {
        let cal = AcademicCalendar::published_2025();
        let exp = expand_entries(&[entry(Weekday::Wednesday, WeekType::Both)], date(2025, 1, 6), &cal);

        assert!(exp.warnings.is_empty());
        assert_eq!(exp.blocks.len(), 1);
        let block = &exp.blocks[0];
        assert_eq!(block.interval, 1);
        assert_eq!(block.count, FULL_TERM_OCCURRENCES);
        assert_eq!(block.start, date(2025, 1, 8).and_hms_opt(8, 0, 0).unwrap());
        assert_eq!(block.end, date(2025, 1, 8).and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(block.summary, "MATH/S2-06");
    }

    #[test]
    fn test_odd_entry_on_odd_anchor_keeps_date() {
        let cal = AcademicCalendar::published_2025();
        // 2025-01-06 is an odd week
        let exp = expand_entries(&[entry(Weekday::Monday, WeekType::Odd)], date(2025, 1, 6), &cal);

        assert!(exp.warnings.is_empty());
        let block = &exp.blocks[0];
        assert_eq!(block.interval, 2);
        assert_eq!(block.count, FULL_TERM_OCCURRENCES / 2);
        assert_eq!(block.start.date(), date(2025, 1, 6));
    }

    #[test]
    fn test_even_entry_on_odd_anchor_shifts_a_week() {
        let cal = AcademicCalendar::published_2025();
        let exp = expand_entries(&[entry(Weekday::Monday, WeekType::Even)], date(2025, 1, 6), &cal);

        assert!(exp.warnings.is_empty());
        let block = &exp.blocks[0];
        assert_eq!(block.start.date(), date(2025, 1, 13), "phase-shifted to the even week");
        assert_eq!(block.end.date(), date(2025, 1, 13));
        assert_eq!(block.interval, 2);
    }

    #[test]
    fn test_mid_week_start_date_anchors_to_its_monday() {
        let cal = AcademicCalendar::published_2025();
        // Thursday 2025-01-09; anchor is Monday 2025-01-06
        let exp = expand_entries(&[entry(Weekday::Tuesday, WeekType::Both)], date(2025, 1, 9), &cal);
        assert_eq!(exp.blocks[0].start.date(), date(2025, 1, 7));
    }

    #[test]
    fn test_unresolved_anchor_warns_and_still_emits() {
        let cal = AcademicCalendar::published_2025();
        // before the first published week
        let exp = expand_entries(&[entry(Weekday::Monday, WeekType::Odd)], date(2024, 12, 2), &cal);

        assert_eq!(exp.blocks.len(), 1, "entry still emitted");
        assert_eq!(exp.blocks[0].start.date(), date(2024, 12, 2), "unshifted anchor");
        assert_eq!(exp.warnings.len(), 1);
        assert!(exp.warnings[0].contains("unresolved"));
    }

    #[test]
    fn test_exhausted_calendar_warns_and_still_emits() {
        let cal = AcademicCalendar::published_2025();
        // final published week (2025-11-03) is even; no odd week remains
        let exp = expand_entries(&[entry(Weekday::Monday, WeekType::Odd)], date(2025, 11, 3), &cal);

        assert_eq!(exp.blocks.len(), 1);
        assert_eq!(exp.blocks[0].start.date(), date(2025, 11, 3));
        assert_eq!(exp.warnings.len(), 1);
        assert!(exp.warnings[0].contains("No odd week"));
    }

    #[test]
    fn test_malformed_time_skipped_with_warning() {
        let cal = AcademicCalendar::published_2025();
        let bad = Entry::new(Weekday::Monday, "8am", "9am", "MATH", "S2-06", WeekType::Both);
        let exp = expand_entries(&[bad], date(2025, 1, 6), &cal);

        assert!(exp.blocks.is_empty());
        assert_eq!(exp.warnings.len(), 1);
        assert!(exp.warnings[0].contains("unparseable time range"));
    }

    #[test]
    fn test_uid_is_deterministic_and_distinct() {
        let a = entry(Weekday::Monday, WeekType::Odd);
        let b = entry(Weekday::Monday, WeekType::Even);
        assert_eq!(block_uid(&a), block_uid(&a));
        assert_ne!(block_uid(&a), block_uid(&b));
    }
}
