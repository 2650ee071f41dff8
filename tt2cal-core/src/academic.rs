//! Academic calendar resolution.
//!
//! Singapore MOE terms alternate odd and even weeks, with holiday gaps
//! between terms. The published table is loaded once and read-only; every
//! date question is answered against it, and a date outside all published
//! weeks is "unresolved", never a guessed parity.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Deserialize;

use crate::error::{TtCalError, TtCalResult};

/// Parity of a term week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekParity {
    Odd,
    Even,
}

impl WeekParity {
    pub fn as_str(self) -> &'static str {
        match self {
            WeekParity::Odd => "odd",
            WeekParity::Even => "even",
        }
    }
}

/// One published term week. `week_start` is always a Monday.
#[derive(Debug, Clone, Copy)]
pub struct AcademicWeek {
    pub week_start: NaiveDate,
    pub week_type: WeekParity,
    pub term_week: u8,
}

/// Immutable table of published term weeks, ordered by week start.
#[derive(Debug, Clone)]
pub struct AcademicCalendar {
    weeks: Vec<AcademicWeek>,
}

/// Monday of the four 2025 term starts (each term runs ten contiguous
/// weeks; the gaps between terms are school holidays).
const TERM_STARTS_2025: [(i32, u32, u32); 4] =
    [(2025, 1, 6), (2025, 3, 17), (2025, 6, 23), (2025, 9, 1)];

const WEEKS_PER_TERM: u8 = 10;

#[derive(Deserialize)]
struct WeekRow {
    week_start: String,
    week_type: WeekParity,
    term_week: u8,
}

#[derive(Deserialize)]
struct TableFile {
    #[serde(default)]
    week: Vec<WeekRow>,
}

impl AcademicCalendar {
    pub fn new(mut weeks: Vec<AcademicWeek>) -> Self {
        weeks.sort_by_key(|w| w.week_start);
        AcademicCalendar { weeks }
    }

    /// The published 2025 MOE calendar: four terms of ten weeks, odd/even
    /// alternating from week 1 of each term.
    pub fn published_2025() -> Self {
        let mut weeks = Vec::with_capacity(TERM_STARTS_2025.len() * WEEKS_PER_TERM as usize);
        for (y, m, d) in TERM_STARTS_2025 {
            let term_start = NaiveDate::from_ymd_opt(y, m, d).unwrap();
            for i in 0..WEEKS_PER_TERM {
                weeks.push(AcademicWeek {
                    week_start: term_start + Duration::weeks(i64::from(i)),
                    week_type: if i % 2 == 0 {
                        WeekParity::Odd
                    } else {
                        WeekParity::Even
                    },
                    term_week: i + 1,
                });
            }
        }
        AcademicCalendar::new(weeks)
    }

    /// Load a user-supplied table:
    ///
    /// ```toml
    /// [[week]]
    /// week_start = "2026-01-05"
    /// week_type = "odd"
    /// term_week = 1
    /// ```
    ///
    /// Unknown keys in the document are ignored, so the table can share a
    /// file with other settings. An absent `week` array yields an empty
    /// calendar (callers fall back to the published table).
    pub fn from_toml_str(content: &str) -> TtCalResult<Self> {
        let file: TableFile =
            toml::from_str(content).map_err(|e| TtCalError::CalendarTable(e.to_string()))?;

        let mut weeks = Vec::with_capacity(file.week.len());
        for row in file.week {
            let week_start = NaiveDate::parse_from_str(&row.week_start, "%Y-%m-%d")
                .map_err(|_| {
                    TtCalError::CalendarTable(format!(
                        "Invalid week_start '{}'. Expected YYYY-MM-DD",
                        row.week_start
                    ))
                })?;
            weeks.push(AcademicWeek {
                week_start,
                week_type: row.week_type,
                term_week: row.term_week,
            });
        }
        Ok(AcademicCalendar::new(weeks))
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    /// Parity of the published week containing `date`, or None when the
    /// date falls outside every published week (holiday gap, past years).
    pub fn resolve(&self, date: NaiveDate) -> Option<WeekParity> {
        let idx = self.weeks.partition_point(|w| w.week_start <= date);
        if idx == 0 {
            return None;
        }
        let week = &self.weeks[idx - 1];
        if date <= week.week_start + Duration::days(6) {
            Some(week.week_type)
        } else {
            None
        }
    }

    /// First Monday strictly after `from` whose published week has the
    /// requested parity, scanning week by week and never past the table's
    /// last entry. A `from` that is itself a Monday advances a full week.
    pub fn next_monday(
        &self,
        parity: WeekParity,
        from: NaiveDate,
    ) -> Option<(NaiveDate, WeekParity)> {
        let days_ahead = match (8 - from.weekday().number_from_monday()) % 7 {
            0 => 7,
            n => n,
        };
        let mut monday = from + Duration::days(i64::from(days_ahead));

        let last = self.weeks.last()?.week_start;
        while monday <= last {
            if let Some(found) = self.resolve(monday) {
                if found == parity {
                    return Some((monday, found));
                }
            }
            monday += Duration::days(7);
        }
        None
    }
}
