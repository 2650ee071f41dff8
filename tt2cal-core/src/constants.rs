//! Shared constants for the normalization pipeline.

/// Fewer raw entries than this is flagged by the validator (a full
/// timetable extraction usually yields 30-40 slot entries).
pub const MIN_PLAUSIBLE_ENTRIES: usize = 20;

/// Slot boundaries that fall inside the canonical 12:00-13:00 lunch break.
/// The smart merge policy never extends a block across any of these.
pub const LUNCH_BOUNDARIES: [&str; 4] = ["12:00", "12:20", "12:40", "13:00"];

/// Longest single session the smart merge policy will produce, in minutes.
pub const MAX_SESSION_MINUTES: i64 = 120;

/// Occurrence budget for a weekly (every-week) event, approximating one
/// academic year of classes. Alternating-week events get half of this.
pub const FULL_TERM_OCCURRENCES: u32 = 40;

/// Timezone the emitted calendar is qualified with unless overridden.
pub const DEFAULT_TIMEZONE: &str = "Asia/Singapore";
