//! Coverage badge maintenance.
//!
//! Reads the total line rate out of a `coverage.xml` report and rewrites
//! the shields.io coverage badge in a target document to match.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;

const BADGE_PATTERN: &str =
    r"!\[Coverage\]\(https://img\.shields\.io/badge/coverage-\d+\.?\d*-[^)]*\)";

/// Extract the total coverage percentage from a `coverage.xml` file.
pub fn extract_coverage(path: &Path) -> Result<f64> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read coverage report {}", path.display()))?;
    let doc = roxmltree::Document::parse(&content)
        .with_context(|| format!("Failed to parse coverage report {}", path.display()))?;

    let line_rate = doc
        .root_element()
        .attribute("line-rate")
        .context("coverage report has no line-rate attribute")?;
    let line_rate: f64 = line_rate
        .parse()
        .with_context(|| format!("line-rate '{line_rate}' is not a number"))?;

    Ok(line_rate * 100.0)
}

/// Badge color for a coverage percentage.
pub fn badge_color(coverage: f64) -> &'static str {
    if coverage >= 90.0 {
        "green"
    } else if coverage >= 75.0 {
        "yellow"
    } else {
        "red"
    }
}

/// The full badge Markdown for a coverage percentage.
pub fn badge_markdown(coverage: f64) -> String {
    format!(
        "![Coverage](https://img.shields.io/badge/coverage-{coverage:.2}-{}?style=for-the-badge)",
        badge_color(coverage)
    )
}

/// Rewrite every coverage badge in `document` with the new percentage.
pub fn update_badge(document: &Path, coverage: f64) -> Result<()> {
    let content = fs::read_to_string(document)
        .with_context(|| format!("Failed to read {}", document.display()))?;

    let pattern = Regex::new(BADGE_PATTERN).expect("badge pattern is a valid regex");
    let updated = pattern
        .replace_all(&content, badge_markdown(coverage).as_str())
        .into_owned();

    fs::write(document, updated)
        .with_context(|| format!("Failed to write {}", document.display()))?;
    Ok(())
}
