//! Scenario engine for Given/When/Then/But test cases.
//!
//! A [`Scenario`] owns a phase-keyed context that accumulates state as the
//! caller chains phase calls. `given` and `when` write to the context,
//! `then` and `but` read it and evaluate assertions. Each call returns a
//! handle to the same scenario so chains read like natural language.

use colored::Colorize;
use indexmap::IndexMap;
use serde_json::Value;
use strum::{Display, EnumString};

use crate::error::{Result, TestamentError};

/// Context key written by [`Scenario::given`].
pub const GIVEN: &str = "given";
/// Context key written by [`Scenario::when`].
pub const WHEN: &str = "when";

/// Marker printed after a passing assertion.
pub const CHECK: &str = "\u{2713}";
/// Marker printed next to a failed step in reports.
pub const CROSS: &str = "\u{2715}";

/// Terminal classification of a single scenario step, for reporting.
///
/// The scenario itself never enforces these; the runner assigns them when
/// it summarizes an execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StepStatus {
    Completed,
    Excluded,
    Failed,
    Skipped,
    #[strum(serialize = "NOT EXECUTED")]
    NotExecuted,
}

/// A value attached to a phase: either a ready literal or a deferred
/// computation.
///
/// Producers run exactly once, at the moment the phase is declared. A
/// producer receives the value of the preceding phase (`Null` for `given`),
/// so a `when` action can derive its result from the `given` setup.
pub enum StepValue {
    Literal(Value),
    Producer(Box<dyn FnOnce(&Value) -> Value>),
}

impl StepValue {
    /// A ready structured value.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// A zero-argument producer, invoked when the phase executes.
    pub fn producer(produce: impl FnOnce() -> Value + 'static) -> Self {
        Self::Producer(Box::new(move |_| produce()))
    }

    /// A deferred computation over the preceding phase's value.
    pub fn derive(produce: impl FnOnce(&Value) -> Value + 'static) -> Self {
        Self::Producer(Box::new(produce))
    }

    /// Normalize to a literal, running the producer if present.
    fn resolve(self, input: &Value) -> Value {
        match self {
            Self::Literal(value) => value,
            Self::Producer(produce) => produce(input),
        }
    }
}

impl From<Value> for StepValue {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

/// A named BDD scenario with its accumulated phase context.
#[derive(Debug)]
pub struct Scenario {
    name: String,
    context: IndexMap<String, Value>,
}

/// Define a scenario with the given name.
pub fn scenario(name: impl Into<String>) -> Result<Scenario> {
    Scenario::new(name)
}

impl Scenario {
    /// Construct an empty scenario. The name must be non-empty.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TestamentError::input("scenario name must not be empty"));
        }
        Ok(Self {
            name,
            context: IndexMap::new(),
        })
    }

    /// The name of the scenario.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The phase-keyed context accumulated so far.
    pub fn context(&self) -> &IndexMap<String, Value> {
        &self.context
    }

    fn phase_input(&self, key: &str) -> Value {
        self.context.get(key).cloned().unwrap_or(Value::Null)
    }

    /// Set up initial context for the scenario.
    pub fn given(&mut self, description: &str, setup: impl Into<StepValue>) -> &mut Self {
        let resolved = setup.into().resolve(&Value::Null);
        println!("GIVEN: {description} -> {resolved}");
        self.context.insert(GIVEN.to_string(), resolved);
        self
    }

    /// Perform an action based on the setup. Overwrites any earlier `when`.
    pub fn when(&mut self, description: &str, action: impl Into<StepValue>) -> &mut Self {
        let input = self.phase_input(GIVEN);
        let resolved = action.into().resolve(&input);
        println!("WHEN: {description} -> {resolved}");
        self.context.insert(WHEN.to_string(), resolved);
        self
    }

    /// Verify an expected result against the `when` value.
    ///
    /// A false assertion yields a validation error with the message
    /// `THEN failed: <description>`.
    pub fn then(
        &mut self,
        description: &str,
        assertion: impl FnOnce(&Value) -> bool,
    ) -> Result<&mut Self> {
        self.check("THEN", description, assertion)
    }

    /// Check an alternative condition, with message `BUT failed: <description>`.
    pub fn but(
        &mut self,
        description: &str,
        assertion: impl FnOnce(&Value) -> bool,
    ) -> Result<&mut Self> {
        self.check("BUT", description, assertion)
    }

    fn check(
        &mut self,
        phase: &str,
        description: &str,
        assertion: impl FnOnce(&Value) -> bool,
    ) -> Result<&mut Self> {
        let observed = self.phase_input(WHEN);
        if !assertion(&observed) {
            return Err(TestamentError::validation(format!(
                "{phase} failed: {description}"
            )));
        }
        println!("{phase}: {description} {}", CHECK.green());
        Ok(self)
    }
}
