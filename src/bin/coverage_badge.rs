//! Standalone tool: refresh the README coverage badge from coverage.xml.

use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::Parser;

use testament::report::coverage;

/// Update a document's coverage badge from a coverage.xml report.
#[derive(Parser)]
#[command(name = "testament-coverage", version)]
struct Args {
    /// Coverage XML report to read
    #[arg(default_value = "coverage.xml")]
    coverage_file: PathBuf,

    /// Document whose badge gets rewritten
    #[arg(short, long, default_value = "README.md")]
    document: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    ensure!(
        args.coverage_file.exists(),
        "{} not found. Did the coverage report generate correctly?",
        args.coverage_file.display()
    );

    let coverage = coverage::extract_coverage(&args.coverage_file)?;
    println!("Extracted coverage: {coverage:.2}%");

    coverage::update_badge(&args.document, coverage)?;
    println!(
        "Updated {} with the new coverage badge.",
        args.document.display()
    );
    Ok(())
}
