//! Timetable entry types.
//!
//! `RawEntry` is the untrusted, all-strings shape produced by the external
//! extraction service. `Entry` is the normalized shape the pipeline and the
//! edit layer work with. Slot times stay "HH:MM" strings in both: string
//! comparison is order-preserving for valid 24-hour times, and malformed
//! times must degrade gracefully rather than crash a stage.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TtCalError, TtCalResult};

/// School-week day. Weekends never appear on the source timetables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Offset from Monday (Monday = 0 .. Friday = 4).
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = TtCalError;

    fn from_str(s: &str) -> TtCalResult<Self> {
        Weekday::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| TtCalError::InvalidWeekday(s.to_string()))
    }
}

/// Whether a class runs on odd term weeks, even term weeks, or every week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekType {
    Odd,
    Even,
    Both,
}

impl WeekType {
    pub fn as_str(self) -> &'static str {
        match self {
            WeekType::Odd => "odd",
            WeekType::Even => "even",
            WeekType::Both => "both",
        }
    }
}

impl fmt::Display for WeekType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeekType {
    type Err = TtCalError;

    fn from_str(s: &str) -> TtCalResult<Self> {
        match s {
            "odd" => Ok(WeekType::Odd),
            "even" => Ok(WeekType::Even),
            "both" => Ok(WeekType::Both),
            other => Err(TtCalError::InvalidWeekType(other.to_string())),
        }
    }
}

/// One raw slot entry as returned by the extraction service. Untrusted:
/// any field may be empty, malformed, or duplicated across the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntry {
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub time_start: String,
    #[serde(default)]
    pub time_end: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub week_type: String,
}

/// A raw extraction batch: slot entries plus opaque pass-through metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBatch {
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub term: Option<String>,
    #[serde(default)]
    pub entries: Vec<RawEntry>,
}

impl RawBatch {
    /// Deserialize a batch from the extraction collaborator's JSON.
    /// A batch that is not a JSON object with an entries array at all is
    /// the one hard failure of the pipeline boundary.
    pub fn from_json(content: &str) -> TtCalResult<Self> {
        serde_json::from_str(content).map_err(|e| TtCalError::Serialization(e.to_string()))
    }
}

/// A normalized timetable entry. Immutable value record as far as the
/// pipeline is concerned; the edit layer goes through the setters so the
/// title stays derived from subject and location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub day: Weekday,
    pub time_start: String,
    pub time_end: String,
    pub subject: String,
    pub location: String,
    pub week_type: WeekType,
    /// Always "{subject}/{location}".
    pub title: String,
}

/// Display title for a subject/location pair.
pub fn derive_title(subject: &str, location: &str) -> String {
    format!("{subject}/{location}")
}

impl Entry {
    pub fn new(
        day: Weekday,
        time_start: impl Into<String>,
        time_end: impl Into<String>,
        subject: &str,
        location: &str,
        week_type: WeekType,
    ) -> Self {
        let subject = subject.trim().to_string();
        let location = location.trim().to_string();
        let title = derive_title(&subject, &location);
        Entry {
            day,
            time_start: time_start.into(),
            time_end: time_end.into(),
            subject,
            location,
            week_type,
            title,
        }
    }

    /// Typed view of a raw entry. Fails on an unknown day or week tag;
    /// times are carried as-is, malformed or not.
    pub fn from_raw(raw: &RawEntry) -> TtCalResult<Self> {
        let day: Weekday = raw.day.parse()?;
        let week_type: WeekType = raw.week_type.parse()?;
        Ok(Entry::new(
            day,
            raw.time_start.clone(),
            raw.time_end.clone(),
            &raw.subject,
            &raw.location,
            week_type,
        ))
    }

    pub fn set_subject(&mut self, subject: &str) {
        self.subject = subject.trim().to_string();
        self.title = derive_title(&self.subject, &self.location);
    }

    pub fn set_location(&mut self, location: &str) {
        self.location = location.trim().to_string();
        self.title = derive_title(&self.subject, &self.location);
    }

    /// Short human-readable slot description, used in diagnostics.
    pub fn slot_label(&self) -> String {
        format!(
            "{} {}-{} {} ({})",
            self.day, self.time_start, self.time_end, self.subject, self.location
        )
    }
}

/// A normalized timetable: the edit layer and the calendar emitter both
/// consume this shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timetable {
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub term: Option<String>,
    pub entries: Vec<Entry>,
}
