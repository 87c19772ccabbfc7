//! Tests for the JUnit and coverage report tools.

use std::fs;

use testament::report::coverage;
use testament::report::junit::{self, CaseStatus};

const FAILING_SUITE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<testsuite name="behave" tests="1" failures="1">
  <testcase name="counter_increments" classname="features.counter" time="0.012">
    <failure message="count should be 6">assertion failed</failure>
  </testcase>
</testsuite>"#;

const MIXED_SUITE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<testsuite name="behave" tests="3" failures="1" errors="1">
  <testcase name="passes" classname="features.basic" time="0.001"/>
  <testcase name="fails" classname="features.basic" time="0.002">
    <failure message="expected 6"/>
  </testcase>
  <testcase name="errors" classname="features.basic" time="0.003">
    <error message="setup exploded"/>
  </testcase>
</testsuite>"#;

#[test]
fn test_parse_junit_single_failure() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("results.xml");
    fs::write(&report, FAILING_SUITE).unwrap();

    let summary = junit::parse_junit_xml(&report).unwrap();
    assert_eq!(summary.total_tests, 1);
    assert_eq!(summary.failed_tests, 1);
    assert_eq!(summary.error_tests, 0);

    let case = &summary.test_cases[0];
    assert_eq!(case.name, "counter_increments");
    assert_eq!(case.classname, "features.counter");
    assert!(case.status.to_string().starts_with("FAILED:"));
}

#[test]
fn test_parse_junit_mixed_statuses() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("results.xml");
    fs::write(&report, MIXED_SUITE).unwrap();

    let summary = junit::parse_junit_xml(&report).unwrap();
    assert_eq!(summary.total_tests, 3);
    assert_eq!(summary.failed_tests, 1);
    assert_eq!(summary.error_tests, 1);
    assert_eq!(summary.test_cases[0].status, CaseStatus::Passed);
    assert_eq!(
        summary.test_cases[1].status,
        CaseStatus::Failed("expected 6".to_string())
    );
    assert_eq!(
        summary.test_cases[2].status,
        CaseStatus::Error("setup exploded".to_string())
    );
}

#[test]
fn test_missing_failure_message_gets_default() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("results.xml");
    fs::write(
        &report,
        r#"<testsuite><testcase name="t" classname="c" time="0"><failure/></testcase></testsuite>"#,
    )
    .unwrap();

    let summary = junit::parse_junit_xml(&report).unwrap();
    assert_eq!(
        summary.test_cases[0].status,
        CaseStatus::Failed("No message".to_string())
    );
}

#[test]
fn test_junit_markdown_sections_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("alpha.xml"), FAILING_SUITE).unwrap();
    fs::write(dir.path().join("beta.xml"), MIXED_SUITE).unwrap();
    fs::write(dir.path().join("notes.txt"), "not a report").unwrap();

    let output = dir.path().join("report.md");
    junit::junit_reports_to_markdown(dir.path(), &output).unwrap();

    let markdown = fs::read_to_string(&output).unwrap();
    assert!(markdown.contains("## Results from alpha.xml"));
    assert!(markdown.contains("## Results from beta.xml"));
    assert!(markdown.contains("### counter_increments (features.counter)"));
    assert!(markdown.contains("**Status**: FAILED: count should be 6"));
    assert!(markdown.contains("## Summary"));
    assert!(markdown.contains("**Total Tests**: 4"));
    assert!(markdown.contains("**Failed**: 2"));
    assert!(markdown.contains("**Errors**: 1"));
    // Sections come out in filename order.
    let alpha = markdown.find("## Results from alpha.xml").unwrap();
    let beta = markdown.find("## Results from beta.xml").unwrap();
    assert!(alpha < beta);
}

#[test]
fn test_extract_coverage_percentage() {
    let dir = tempfile::tempdir().unwrap();
    let coverage_file = dir.path().join("coverage.xml");
    fs::write(
        &coverage_file,
        r#"<?xml version="1.0"?><coverage line-rate="0.8744" branch-rate="0.7"></coverage>"#,
    )
    .unwrap();

    let coverage = coverage::extract_coverage(&coverage_file).unwrap();
    assert!((coverage - 87.44).abs() < 1e-9);
    assert_eq!(coverage::badge_color(coverage), "yellow");
}

#[test]
fn test_extract_coverage_missing_attribute() {
    let dir = tempfile::tempdir().unwrap();
    let coverage_file = dir.path().join("coverage.xml");
    fs::write(&coverage_file, r#"<coverage></coverage>"#).unwrap();

    assert!(coverage::extract_coverage(&coverage_file).is_err());
}

#[test]
fn test_update_badge_rewrites_document() {
    let dir = tempfile::tempdir().unwrap();
    let readme = dir.path().join("README.md");
    fs::write(
        &readme,
        "# Project\n\n![Coverage](https://img.shields.io/badge/coverage-55.00-red?style=for-the-badge)\n",
    )
    .unwrap();

    coverage::update_badge(&readme, 97.44).unwrap();

    let updated = fs::read_to_string(&readme).unwrap();
    assert!(updated.contains(
        "![Coverage](https://img.shields.io/badge/coverage-97.44-green?style=for-the-badge)"
    ));
    assert!(!updated.contains("55.00"));
}

#[test]
fn test_update_badge_leaves_other_content_alone() {
    let dir = tempfile::tempdir().unwrap();
    let readme = dir.path().join("README.md");
    fs::write(
        &readme,
        "intro\n![Coverage](https://img.shields.io/badge/coverage-80.00-yellow?style=for-the-badge)\noutro\n",
    )
    .unwrap();

    coverage::update_badge(&readme, 74.5).unwrap();

    let updated = fs::read_to_string(&readme).unwrap();
    assert!(updated.starts_with("intro\n"));
    assert!(updated.ends_with("outro\n"));
    assert!(updated.contains("coverage-74.50-red"));
}
