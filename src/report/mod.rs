//! Report scraping tools.
//!
//! Standalone helpers around the runner: JUnit XML results rendered as
//! Markdown, and a coverage badge kept up to date from `coverage.xml`.
//! Both are exposed as their own binaries (`testament-junit`,
//! `testament-coverage`).

pub mod coverage;
pub mod junit;
