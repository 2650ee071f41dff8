mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tt2cal_core::pipeline::MergeStrategy;

#[derive(Parser)]
#[command(name = "tt2cal")]
#[command(about = "Convert extracted school timetables into recurring iCalendar files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Merge strictly adjacent identical slots
    Naive,
    /// Also respect lunch breaks, session length and subject types
    Smart,
}

impl From<PolicyArg> for MergeStrategy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Naive => MergeStrategy::Naive,
            PolicyArg::Smart => MergeStrategy::Smart,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Check a raw extraction batch for structural problems
    Validate {
        /// JSON file with the extracted raw batch
        input: PathBuf,
    },
    /// Run the normalization pipeline and print the timetable as JSON
    Normalize {
        /// JSON file with the extracted raw batch
        input: PathBuf,

        /// Merge policy to apply
        #[arg(long, value_enum, default_value = "smart")]
        policy: PolicyArg,
    },
    /// Normalize a batch and emit a recurring .ics calendar
    Export {
        /// JSON file with the extracted raw batch
        input: PathBuf,

        /// Output .ics path (defaults to <student>_<term>.ics)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Anchor date (YYYY-MM-DD); defaults to the next Monday
        #[arg(long)]
        start: Option<String>,

        /// Merge policy to apply
        #[arg(long, value_enum, default_value = "smart")]
        policy: PolicyArg,

        /// Timezone the calendar is qualified with
        #[arg(long)]
        timezone: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { input } => commands::validate::run(&input),
        Commands::Normalize { input, policy } => commands::normalize::run(&input, policy.into()),
        Commands::Export {
            input,
            output,
            start,
            policy,
            timezone,
        } => commands::export::run(&input, output, start.as_deref(), policy.into(), timezone),
    }
}
