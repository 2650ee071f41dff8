//! Core library for tt2cal: timetable normalization and recurrence
//! expansion.
//!
//! The pipeline takes a noisy, slot-by-slot extraction of a school
//! timetable and turns it into calendar-ready blocks:
//!
//! raw batch -> validate (diagnostics only) -> consolidate odd/even
//! duplicates -> merge consecutive slots -> expand onto real dates ->
//! emit a recurring-event .ics artifact.
//!
//! Every stage is a pure, synchronous transformation; diagnostics are
//! returned as data, never thrown.

pub mod academic;
pub mod consolidate;
pub mod constants;
pub mod entry;
pub mod error;
pub mod expand;
pub mod ics;
pub mod merge;
pub mod pipeline;
pub mod time;
pub mod validate;

pub use entry::{Entry, RawBatch, RawEntry, Timetable, WeekType, Weekday};
pub use error::{TtCalError, TtCalResult};
