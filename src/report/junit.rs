//! JUnit XML report parsing and Markdown rendering.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Outcome of a single JUnit test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseStatus {
    Passed,
    Failed(String),
    Error(String),
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "PASSED"),
            Self::Failed(message) => write!(f, "FAILED: {message}"),
            Self::Error(message) => write!(f, "ERROR: {message}"),
        }
    }
}

/// One `testcase` element from a JUnit report.
#[derive(Debug, Clone)]
pub struct TestCaseRecord {
    pub name: String,
    pub classname: String,
    pub time: String,
    pub status: CaseStatus,
}

/// Parsed contents of one JUnit XML file.
#[derive(Debug, Clone, Default)]
pub struct JunitSummary {
    pub test_cases: Vec<TestCaseRecord>,
    pub total_tests: usize,
    pub failed_tests: usize,
    pub error_tests: usize,
}

const NO_MESSAGE: &str = "No message";

/// Parse a single JUnit XML file.
pub fn parse_junit_xml(path: &Path) -> Result<JunitSummary> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JUnit report {}", path.display()))?;
    let doc = roxmltree::Document::parse(&content)
        .with_context(|| format!("Failed to parse JUnit report {}", path.display()))?;

    let mut test_cases = Vec::new();
    for node in doc.descendants().filter(|n| n.has_tag_name("testcase")) {
        let failure = node.children().find(|c| c.has_tag_name("failure"));
        let error = node.children().find(|c| c.has_tag_name("error"));

        let status = if let Some(failure) = failure {
            CaseStatus::Failed(
                failure
                    .attribute("message")
                    .unwrap_or(NO_MESSAGE)
                    .to_string(),
            )
        } else if let Some(error) = error {
            CaseStatus::Error(error.attribute("message").unwrap_or(NO_MESSAGE).to_string())
        } else {
            CaseStatus::Passed
        };

        test_cases.push(TestCaseRecord {
            name: node.attribute("name").unwrap_or_default().to_string(),
            classname: node.attribute("classname").unwrap_or_default().to_string(),
            time: node.attribute("time").unwrap_or_default().to_string(),
            status,
        });
    }

    let total_tests = test_cases.len();
    let failed_tests = doc
        .descendants()
        .filter(|n| n.has_tag_name("failure"))
        .count();
    let error_tests = doc
        .descendants()
        .filter(|n| n.has_tag_name("error"))
        .count();

    Ok(JunitSummary {
        test_cases,
        total_tests,
        failed_tests,
        error_tests,
    })
}

/// Convert every `.xml` report under `junit_dir` into one Markdown file.
///
/// Files are processed in name order so the output is deterministic.
pub fn junit_reports_to_markdown(junit_dir: &Path, output_file: &Path) -> Result<()> {
    let mut report_files: Vec<_> = fs::read_dir(junit_dir)
        .with_context(|| format!("Failed to list reports in {}", junit_dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "xml"))
        .collect();
    report_files.sort();

    let mut markdown = String::new();
    let mut total_tests = 0;
    let mut total_failures = 0;
    let mut total_errors = 0;

    for report_file in &report_files {
        let summary = parse_junit_xml(report_file)?;
        let filename = report_file
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        markdown.push_str(&format!("## Results from {filename}\n\n"));
        for case in &summary.test_cases {
            markdown.push_str(&format!("### {} ({})\n\n", case.name, case.classname));
            markdown.push_str(&format!("**Status**: {}\n\n", case.status));
            markdown.push_str(&format!("**Time**: {} seconds\n\n", case.time));
            markdown.push_str("---\n\n");
        }

        total_tests += summary.total_tests;
        total_failures += summary.failed_tests;
        total_errors += summary.error_tests;
    }

    markdown.push_str("## Summary\n\n");
    markdown.push_str(&format!("**Total Tests**: {total_tests}\n\n"));
    markdown.push_str(&format!("**Failed**: {total_failures}\n\n"));
    markdown.push_str(&format!("**Errors**: {total_errors}\n\n"));

    fs::write(output_file, markdown)
        .with_context(|| format!("Failed to write report to {}", output_file.display()))?;
    Ok(())
}
