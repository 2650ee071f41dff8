use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate};
use owo_colors::OwoColorize;
use tt2cal_core::entry::Timetable;
use tt2cal_core::expand::expand_entries;
use tt2cal_core::ics::generate_ics;
use tt2cal_core::pipeline::{MergeStrategy, normalize};

use crate::config::Settings;

pub fn run(
    input: &Path,
    output: Option<PathBuf>,
    start: Option<&str>,
    strategy: MergeStrategy,
    timezone: Option<String>,
) -> Result<()> {
    let settings = Settings::load()?;
    let timezone = timezone.unwrap_or(settings.timezone);

    let batch = super::load_batch(input)?;
    let result = normalize(batch, strategy);

    for issue in &result.report.issues {
        eprintln!("{} {}", "!".yellow(), issue);
    }
    for diag in &result.diagnostics {
        eprintln!("{} {}", "·".dimmed(), diag);
    }

    let start_date = match start {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid start date '{s}'. Expected YYYY-MM-DD"))?,
        None => next_monday_from_today(),
    };

    let expansion = expand_entries(&result.timetable.entries, start_date, &settings.calendar);
    for warning in &expansion.warnings {
        eprintln!("{} {}", "!".yellow(), warning);
    }

    let ics = generate_ics(&result.timetable, &expansion.blocks, &timezone)?;

    let output = output.unwrap_or_else(|| default_output_name(&result.timetable));
    std::fs::write(&output, &ics)
        .with_context(|| format!("Could not write {}", output.display()))?;

    println!(
        "{} Wrote {} recurring events to {}",
        "✓".green(),
        expansion.blocks.len(),
        output.display()
    );
    Ok(())
}

/// The Monday strictly after today.
fn next_monday_from_today() -> NaiveDate {
    let today = chrono::Local::now().date_naive();
    let days_ahead = match (8 - today.weekday().number_from_monday()) % 7 {
        0 => 7,
        n => n,
    };
    today + Duration::days(i64::from(days_ahead))
}

fn default_output_name(timetable: &Timetable) -> PathBuf {
    let student = timetable.student_name.as_deref().unwrap_or("timetable");
    let term = timetable.term.as_deref().unwrap_or("schedule");
    PathBuf::from(format!("{student}_{term}.ics"))
}
