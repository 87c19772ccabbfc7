//! Standalone tool: collect JUnit XML reports into a Markdown summary.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use testament::report::junit;

/// Convert JUnit XML reports to a single Markdown file.
#[derive(Parser)]
#[command(name = "testament-junit", version)]
struct Args {
    /// Directory containing the .xml reports
    #[arg(default_value = "reports")]
    junit_dir: PathBuf,

    /// Markdown file to write
    #[arg(short, long, default_value = "behave_report.md")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    junit::junit_reports_to_markdown(&args.junit_dir, &args.output)?;
    println!("Wrote report to {}", args.output.display());
    Ok(())
}
