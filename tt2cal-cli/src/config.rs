//! User configuration at ~/.config/tt2cal/calendar.toml.
//!
//! The file can set a timezone and replace the built-in academic-week
//! table:
//!
//! ```toml
//! timezone = "Asia/Singapore"
//!
//! [[week]]
//! week_start = "2026-01-05"
//! week_type = "odd"
//! term_week = 1
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;
use tt2cal_core::academic::AcademicCalendar;
use tt2cal_core::constants::DEFAULT_TIMEZONE;

#[derive(Deserialize, Default)]
#[serde(default)]
struct FileSettings {
    timezone: Option<String>,
}

pub struct Settings {
    pub timezone: String,
    pub calendar: AcademicCalendar,
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("tt2cal").join("calendar.toml"))
    }

    /// Load settings; without a config file the published 2025 table and
    /// the default timezone apply.
    pub fn load() -> Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::built_in());
        };
        if !path.exists() {
            return Ok(Self::built_in());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        let file: FileSettings = toml::from_str(&content)
            .with_context(|| format!("Could not parse {}", path.display()))?;
        let table = AcademicCalendar::from_toml_str(&content)
            .with_context(|| format!("Invalid week table in {}", path.display()))?;

        Ok(Settings {
            timezone: file.timezone.unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
            calendar: if table.is_empty() {
                AcademicCalendar::published_2025()
            } else {
                table
            },
        })
    }

    fn built_in() -> Self {
        Settings {
            timezone: DEFAULT_TIMEZONE.to_string(),
            calendar: AcademicCalendar::published_2025(),
        }
    }
}
