//! Execution of scenario files for the `run` command.
//!
//! Loads a scenario file, verifies the environment it requires, drives the
//! scenario engine through each phase and prints a per-step status report.
//! An assertion failure propagates as a validation error after the report
//! is printed; the scenario never resumes past it.

use std::path::Path;

use colored::Colorize;
use tracing::{debug, info, warn};

use crate::error::{Result, TestamentError};
use crate::scenario::{Scenario, StepStatus, StepValue, CROSS};
use crate::scenario_file::{CheckSpec, ScenarioFile};
use crate::shell;

/// One step of an executed scenario, labeled for the report.
#[derive(Debug, Clone)]
pub struct StepReport {
    pub label: String,
    pub status: StepStatus,
}

impl StepReport {
    fn new(phase: &str, description: &str, status: StepStatus) -> Self {
        Self {
            label: format!("{phase} {description}"),
            status,
        }
    }
}

/// Run the scenario file at `path`.
///
/// The path must point at an existing, non-directory file; anything else
/// is an input error. A missing required command is a runtime error, and a
/// failed check surfaces as the engine's validation error.
pub fn run_from_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(
            TestamentError::input(format!("No such file: {}", path.display()))
                .with_help("Pass the path to an existing scenario file."),
        );
    }
    if path.is_dir() {
        return Err(
            TestamentError::input(format!("{} is a directory", path.display()))
                .with_help("Pass a scenario file, not a directory."),
        );
    }

    let file = ScenarioFile::load_from_file(path)?;
    info!("loaded scenario '{}' from {}", file.name, path.display());

    if file.then.is_empty() && file.but.is_empty() {
        warn!("scenario '{}' defines no checks", file.name);
    }

    if let Some(missing) = first_missing_requirement(&file) {
        let reports = plan_reports(&file, StepStatus::Skipped);
        print_report(&file.name, &reports);
        return Err(TestamentError::runtime(format!(
            "required command not available: {missing}"
        ))
        .with_help("Install the missing command and run the scenario again."));
    }

    execute(&file)
}

fn first_missing_requirement(file: &ScenarioFile) -> Option<&str> {
    file.requires.iter().map(String::as_str).find(|command| {
        let available = shell::binary_available(command);
        debug!("requirement '{command}' available: {available}");
        !available
    })
}

/// All steps of the file with one uniform status, for runs that never start.
fn plan_reports(file: &ScenarioFile, status: StepStatus) -> Vec<StepReport> {
    let mut reports = vec![StepReport::new("GIVEN", &file.given.description, status)];
    if let Some(when) = &file.when {
        reports.push(StepReport::new("WHEN", &when.description, status));
    }
    for check in &file.then {
        reports.push(StepReport::new("THEN", &check.description, status));
    }
    for check in &file.but {
        reports.push(StepReport::new("BUT", &check.description, status));
    }
    reports
}

fn execute(file: &ScenarioFile) -> Result<()> {
    let mut scenario = Scenario::new(file.name.as_str())?;
    let mut reports = Vec::new();

    scenario.given(
        &file.given.description,
        StepValue::literal(file.given.value.clone()),
    );
    reports.push(StepReport::new(
        "GIVEN",
        &file.given.description,
        StepStatus::Completed,
    ));

    if let Some(when) = &file.when {
        scenario.when(&when.description, StepValue::literal(when.value.clone()));
        reports.push(StepReport::new(
            "WHEN",
            &when.description,
            StepStatus::Completed,
        ));
    }

    let checks: Vec<(&str, &CheckSpec)> = file
        .then
        .iter()
        .map(|check| ("THEN", check))
        .chain(file.but.iter().map(|check| ("BUT", check)))
        .collect();

    let mut failure: Option<TestamentError> = None;
    for (index, (phase, check)) in checks.iter().enumerate() {
        if check.skip {
            debug!("skipping excluded check '{}'", check.description);
            reports.push(StepReport::new(phase, &check.description, StepStatus::Excluded));
            continue;
        }

        let spec = (*check).clone();
        let outcome = match *phase {
            "THEN" => scenario.then(&check.description, move |observed| spec.evaluate(observed)),
            _ => scenario.but(&check.description, move |observed| spec.evaluate(observed)),
        };

        match outcome {
            Ok(_) => {
                reports.push(StepReport::new(phase, &check.description, StepStatus::Completed));
            }
            Err(err) => {
                reports.push(StepReport::new(phase, &check.description, StepStatus::Failed));
                for (later_phase, later) in &checks[index + 1..] {
                    reports.push(StepReport::new(
                        later_phase,
                        &later.description,
                        StepStatus::NotExecuted,
                    ));
                }
                failure = Some(err);
                break;
            }
        }
    }

    print_report(&file.name, &reports);
    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn print_report(name: &str, reports: &[StepReport]) {
    let completed = reports
        .iter()
        .filter(|report| report.status == StepStatus::Completed)
        .count();
    println!();
    println!("Scenario '{name}': {completed}/{} steps completed", reports.len());
    for report in reports {
        let status = match report.status {
            StepStatus::Completed => report.status.to_string().green(),
            StepStatus::Failed => format!("{} {CROSS}", report.status).red(),
            StepStatus::Skipped | StepStatus::Excluded => report.status.to_string().yellow(),
            StepStatus::NotExecuted => report.status.to_string().dimmed(),
        };
        println!("  [{status}] {}", report.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::scenario_file::PhaseSpec;

    fn sample_file(then: Vec<CheckSpec>, but: Vec<CheckSpec>) -> ScenarioFile {
        ScenarioFile {
            name: "counter".to_string(),
            requires: vec![],
            given: PhaseSpec {
                description: "a counter".to_string(),
                value: json!({"count": 5}),
            },
            when: Some(PhaseSpec {
                description: "incrementing".to_string(),
                value: json!({"count": 6}),
            }),
            then,
            but,
        }
    }

    fn equals_check(description: &str, path: &str, expected: serde_json::Value) -> CheckSpec {
        CheckSpec {
            description: description.to_string(),
            path: path.to_string(),
            equals: Some(expected),
            not_equals: None,
            exists: None,
            skip: false,
        }
    }

    #[test]
    fn test_execute_passing_scenario() {
        let file = sample_file(vec![equals_check("count is 6", "count", json!(6))], vec![]);
        assert!(execute(&file).is_ok());
    }

    #[test]
    fn test_execute_failing_scenario_propagates_validation() {
        let file = sample_file(vec![equals_check("count is 10", "count", json!(10))], vec![]);
        let err = execute(&file).unwrap_err();
        assert_eq!(err.message(), "THEN failed: count is 10");
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_skipped_check_is_not_evaluated() {
        let mut skipped = equals_check("count is 10", "count", json!(10));
        skipped.skip = true;
        let file = sample_file(vec![skipped], vec![]);
        assert!(execute(&file).is_ok());
    }

    #[test]
    fn test_failure_marks_later_checks_not_executed() {
        let file = sample_file(
            vec![equals_check("count is 10", "count", json!(10))],
            vec![equals_check("count is not 7", "count", json!(6))],
        );
        // The BUT check would pass, but the failed THEN stops the run first.
        let err = execute(&file).unwrap_err();
        assert_eq!(err.message(), "THEN failed: count is 10");
    }

    #[test]
    fn test_plan_reports_covers_every_step() {
        let file = sample_file(
            vec![equals_check("count is 6", "count", json!(6))],
            vec![equals_check("count is not 7", "count", json!(7))],
        );
        let reports = plan_reports(&file, StepStatus::Skipped);
        assert_eq!(reports.len(), 4);
        assert!(reports
            .iter()
            .all(|report| report.status == StepStatus::Skipped));
    }

    #[test]
    fn test_run_from_file_rejects_missing_path() {
        let err = run_from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
