//! Structural validation of raw extraction batches.
//!
//! The report is diagnostic only: downstream stages always run, on the
//! principle that a partial extraction should still produce a best-effort
//! calendar. Every check is applied independently; nothing short-circuits.

use crate::constants::MIN_PLAUSIBLE_ENTRIES;
use crate::entry::{RawBatch, RawEntry, Weekday};
use crate::time::is_hhmm;

/// Outcome of validating a raw batch.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub issues: Vec<String>,
}

const WEEK_TAGS: [&str; 3] = ["odd", "even", "both"];

/// Validate a raw batch for structural completeness. Never mutates the
/// input and never fails; the report is the whole result.
pub fn validate_batch(batch: &RawBatch) -> ValidationReport {
    let mut issues = Vec::new();

    if batch.entries.len() < MIN_PLAUSIBLE_ENTRIES {
        issues.push(format!(
            "Too few entries extracted ({}). Expected at least {} for a full timetable.",
            batch.entries.len(),
            MIN_PLAUSIBLE_ENTRIES
        ));
    }

    let incomplete = count_where(batch, |e| {
        [
            &e.day,
            &e.time_start,
            &e.time_end,
            &e.subject,
            &e.location,
            &e.week_type,
        ]
        .iter()
        .any(|f| f.trim().is_empty())
    });
    if incomplete > 0 {
        issues.push(format!("{incomplete} entries missing required fields"));
    }

    let bad_times = count_where(batch, |e| {
        !is_hhmm(&e.time_start) || !is_hhmm(&e.time_end)
    });
    if bad_times > 0 {
        issues.push(format!("{bad_times} entries have invalid time format"));
    }

    let bad_weeks = count_where(batch, |e| !WEEK_TAGS.contains(&e.week_type.as_str()));
    if bad_weeks > 0 {
        issues.push(format!("{bad_weeks} entries have invalid week type"));
    }

    let bad_days = count_where(batch, |e| e.day.parse::<Weekday>().is_err());
    if bad_days > 0 {
        issues.push(format!("{bad_days} entries have invalid day"));
    }

    ValidationReport {
        is_valid: issues.is_empty(),
        issues,
    }
}

fn count_where(batch: &RawBatch, pred: impl Fn(&RawEntry) -> bool) -> usize {
    batch.entries.iter().filter(|e| pred(e)).count()
}
