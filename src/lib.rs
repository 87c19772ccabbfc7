//! Testament: building and executing BDD test scenarios.
//!
//! The core of the crate is the scenario engine ([`scenario::Scenario`])
//! and the error taxonomy ([`error::TestamentError`]) that maps every
//! failure to a fixed process exit code. Everything else is the glue that
//! turns those into a command-line tool.

pub mod cli;
pub mod error;
pub mod logging;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod scenario_file;
pub mod shell;

// Re-export the main types for convenience
pub use error::{exit_code, Result, TestamentError};
pub use scenario::{scenario, Scenario, StepStatus, StepValue};
pub use scenario_file::ScenarioFile;
