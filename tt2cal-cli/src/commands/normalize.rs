use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use tt2cal_core::pipeline::{MergeStrategy, normalize};

pub fn run(input: &Path, strategy: MergeStrategy) -> Result<()> {
    let batch = super::load_batch(input)?;
    let result = normalize(batch, strategy);

    for issue in &result.report.issues {
        eprintln!("{} {}", "!".yellow(), issue);
    }
    for diag in &result.diagnostics {
        eprintln!("{} {}", "·".dimmed(), diag);
    }

    // the normalized timetable goes to stdout for the edit layer
    println!("{}", serde_json::to_string_pretty(&result.timetable)?);
    Ok(())
}
