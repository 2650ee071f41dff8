use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use tt2cal_core::validate::validate_batch;

pub fn run(input: &Path) -> Result<()> {
    let batch = super::load_batch(input)?;
    let report = validate_batch(&batch);

    if report.is_valid {
        println!(
            "{} {} entries look structurally sound",
            "✓".green(),
            batch.entries.len()
        );
        return Ok(());
    }

    for issue in &report.issues {
        println!("{} {}", "!".yellow(), issue);
    }
    std::process::exit(1);
}
