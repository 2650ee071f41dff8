//! Week-type consolidation.
//!
//! A class that runs every week is usually extracted twice, once from the
//! odd-week row and once from the even-week row of the source image. This
//! stage folds each such odd/even pair into a single "both" entry. Anything
//! that is not exactly an odd/even pair passes through untouched: the
//! pipeline never drops data on an anomaly, it reports it.

use std::collections::HashMap;

use crate::entry::{Entry, WeekType, derive_title};

/// Identity of a slot, ignoring the week type.
type SlotKey = (crate::entry::Weekday, String, String, String, String);

fn slot_key(entry: &Entry) -> SlotKey {
    (
        entry.day,
        entry.time_start.clone(),
        entry.time_end.clone(),
        entry.subject.clone(),
        entry.location.clone(),
    )
}

/// Classification of one slot-key group.
#[derive(Debug)]
enum GroupOutcome {
    /// Only one entry had this key; passes through unchanged.
    Single(Entry),
    /// An exact odd/even pair, folded into one "both" entry.
    MergedBoth(Entry),
    /// Duplicate same-parity entries or >2 sharing a key. Kept as-is,
    /// with a diagnostic when the group size is anomalous.
    Passthrough(Vec<Entry>, Option<String>),
}

fn classify_group(mut group: Vec<Entry>) -> GroupOutcome {
    match group.len() {
        1 => GroupOutcome::Single(group.remove(0)),
        2 => {
            let has_odd = group.iter().any(|e| e.week_type == WeekType::Odd);
            let has_even = group.iter().any(|e| e.week_type == WeekType::Even);
            if has_odd && has_even {
                let mut merged = group.remove(0);
                merged.week_type = WeekType::Both;
                merged.title = derive_title(&merged.subject, &merged.location);
                GroupOutcome::MergedBoth(merged)
            } else {
                // duplicate odd/odd, even/even etc. - not ours to guess
                GroupOutcome::Passthrough(group, None)
            }
        }
        n => {
            let label = group[0].slot_label();
            GroupOutcome::Passthrough(
                group,
                Some(format!("{n} entries share the slot {label}; left unmerged")),
            )
        }
    }
}

/// Fold odd/even duplicate slots into "both" entries.
///
/// Output order is the first-seen order of each slot key in the input, and
/// within a pass-through group the original input order, so consolidation
/// is deterministic and idempotent.
pub fn consolidate_week_types(entries: Vec<Entry>) -> (Vec<Entry>, Vec<String>) {
    let mut order: Vec<SlotKey> = Vec::new();
    let mut groups: HashMap<SlotKey, Vec<Entry>> = HashMap::new();

    for entry in entries {
        let key = slot_key(&entry);
        let group = groups.entry(key.clone()).or_default();
        if group.is_empty() {
            order.push(key);
        }
        group.push(entry);
    }

    let mut consolidated = Vec::new();
    let mut diagnostics = Vec::new();

    for key in order {
        let group = groups.remove(&key).unwrap_or_default();
        match classify_group(group) {
            GroupOutcome::Single(entry) => consolidated.push(entry),
            GroupOutcome::MergedBoth(entry) => consolidated.push(entry),
            GroupOutcome::Passthrough(entries, warning) => {
                consolidated.extend(entries);
                if let Some(warning) = warning {
                    diagnostics.push(warning);
                }
            }
        }
    }

    (consolidated, diagnostics)
}
