//! Scenario file handling for the `run` command.
//!
//! A scenario file is a JSON document describing one scenario: its setup
//! and action phases plus the declarative checks evaluated against the
//! action's result.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, TestamentError};

/// A declarative scenario loaded from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioFile {
    /// Scenario name, shown in progress output and reports.
    pub name: String,

    /// Commands that must be available before the scenario runs.
    #[serde(default)]
    pub requires: Vec<String>,

    /// Initial context for the scenario.
    pub given: PhaseSpec,

    /// Action phase; its value is what the checks observe.
    #[serde(default)]
    pub when: Option<PhaseSpec>,

    /// Expected-result checks.
    #[serde(default)]
    pub then: Vec<CheckSpec>,

    /// Alternative-condition checks, evaluated after `then`.
    #[serde(default)]
    pub but: Vec<CheckSpec>,
}

/// A `given` or `when` phase: a description plus the value it resolves to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseSpec {
    pub description: String,
    pub value: Value,
}

/// One declarative assertion against the observed value.
///
/// `path` is a dot-separated path into the value (empty path means the
/// whole value). At least one predicate must be set unless the check is
/// skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckSpec {
    pub description: String,

    #[serde(default)]
    pub path: String,

    #[serde(default)]
    pub equals: Option<Value>,

    #[serde(default)]
    pub not_equals: Option<Value>,

    /// When set, requires the path to be present (true) or absent (false).
    #[serde(default)]
    pub exists: Option<bool>,

    /// Skipped checks are reported as excluded and never evaluated.
    #[serde(default)]
    pub skip: bool,
}

impl ScenarioFile {
    /// Load a scenario from a JSON file.
    ///
    /// Read failures are runtime errors; malformed JSON is an input error.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| {
            TestamentError::runtime(format!("Failed to read {}: {err}", path.display()))
        })?;

        let file: Self = serde_json::from_str(&content).map_err(|err| {
            TestamentError::input(format!("Failed to parse {}: {err}", path.display()))
                .with_help("The scenario file must be a JSON document; see the README for the format.")
        })?;

        file.validate()?;
        Ok(file)
    }

    /// Validate the scenario definition.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TestamentError::input("scenario name must not be empty"));
        }
        for check in self.then.iter().chain(self.but.iter()) {
            if check.description.trim().is_empty() {
                return Err(TestamentError::input(
                    "every check needs a non-empty description",
                ));
            }
            if !check.skip && !check.has_predicate() {
                return Err(TestamentError::input(format!(
                    "check '{}' defines no predicate (equals, not_equals or exists)",
                    check.description
                )));
            }
        }
        Ok(())
    }
}

impl CheckSpec {
    fn has_predicate(&self) -> bool {
        self.equals.is_some() || self.not_equals.is_some() || self.exists.is_some()
    }

    /// Evaluate this check against the observed phase value.
    pub fn evaluate(&self, observed: &Value) -> bool {
        let found = lookup_path(observed, &self.path);

        if let Some(expected_presence) = self.exists {
            if found.is_some() != expected_presence {
                return false;
            }
        }
        if let Some(expected) = &self.equals {
            if found != Some(expected) {
                return false;
            }
        }
        if let Some(unexpected) = &self.not_equals {
            if found == Some(unexpected) {
                return false;
            }
        }
        true
    }
}

/// Walk a dot-separated path into a JSON value.
///
/// Numeric segments index into arrays. An empty path refers to the value
/// itself.
fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }
    let mut current = value;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}
