//! The full normalization pipeline.
//!
//! validate -> consolidate -> merge, in that order. Validation is a side
//! channel: its report is carried in the result but never blocks the later
//! stages, so an imperfect extraction still yields a best-effort timetable.

use crate::consolidate::consolidate_week_types;
use crate::entry::{Entry, RawBatch, Timetable};
use crate::merge::{MergePolicy, NaiveMerge, SmartMerge, merge_blocks};
use crate::validate::{ValidationReport, validate_batch};

/// Which merge policy the caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// Zero-gap adjacency only.
    Naive,
    /// Adjacency plus lunch-break, session-length and subject-type limits.
    #[default]
    Smart,
}

impl MergeStrategy {
    fn policy(self) -> &'static dyn MergePolicy {
        match self {
            MergeStrategy::Naive => &NaiveMerge,
            MergeStrategy::Smart => &SmartMerge,
        }
    }
}

/// Everything the pipeline produced for one raw batch.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub timetable: Timetable,
    pub report: ValidationReport,
    /// Stage diagnostics: dropped unparseable entries, consolidation
    /// anomalies, and per-stage size summaries.
    pub diagnostics: Vec<String>,
}

/// Run the normalization pipeline over a raw extraction batch.
pub fn normalize(batch: RawBatch, strategy: MergeStrategy) -> Normalized {
    let report = validate_batch(&batch);

    let mut diagnostics = Vec::new();
    let raw_count = batch.entries.len();

    // Lower raw entries to typed ones. An unknown day or week tag makes an
    // entry unusable for every later stage; it is reported and set aside
    // (the validator has already counted these).
    let mut entries: Vec<Entry> = Vec::with_capacity(raw_count);
    for raw in &batch.entries {
        match Entry::from_raw(raw) {
            Ok(entry) => entries.push(entry),
            Err(e) => diagnostics.push(format!(
                "Dropped entry '{}' ({} {}-{}): {}",
                raw.subject, raw.day, raw.time_start, raw.time_end, e
            )),
        }
    }

    let (consolidated, mut consolidation_diags) = consolidate_week_types(entries);
    diagnostics.append(&mut consolidation_diags);

    let merged = merge_blocks(consolidated, strategy.policy());

    diagnostics.push(format!(
        "{} raw entries -> {} normalized blocks",
        raw_count,
        merged.len()
    ));

    Normalized {
        timetable: Timetable {
            student_name: batch.student_name,
            term: batch.term,
            entries: merged,
        },
        report,
        diagnostics,
    }
}
