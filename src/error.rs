//! Error handling for testament.
//!
//! Provides the closed failure taxonomy used across the crate. Every error
//! belongs to exactly one kind, and the kind alone determines the process
//! exit code the CLI terminates with.

use thiserror::Error;

/// Process exit codes.
///
/// Each [`TestamentError`] kind maps to exactly one of these.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const RUNTIME_ERROR: i32 = 1;
    pub const INPUT_ERROR: i32 = 2;
    pub const VALIDATION_ERROR: i32 = 3;
}

const DEFAULT_HELP_TEXT: &str =
    "Help is available with --help. Use the -v flag to increase output verbosity.";

/// Main error type for testament.
///
/// Carries a user-facing message and optional remediation text. The exit
/// code is derived from the variant and cannot be set independently.
#[derive(Error, Debug)]
pub enum TestamentError {
    /// Internal execution failures (missing environment, unexpected state).
    #[error("{message}")]
    Runtime {
        message: String,
        help_text: Option<String>,
    },

    /// The caller supplied invalid arguments, paths or file contents.
    #[error("{message}")]
    Input {
        message: String,
        help_text: Option<String>,
    },

    /// A scenario assertion failed.
    #[error("{message}")]
    Validation {
        message: String,
        help_text: Option<String>,
    },
}

/// Result type alias for testament operations.
pub type Result<T> = std::result::Result<T, TestamentError>;

impl TestamentError {
    /// Create a runtime error.
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::Runtime {
            message: message.into(),
            help_text: None,
        }
    }

    /// Create an input error.
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
            help_text: None,
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            help_text: None,
        }
    }

    /// Attach remediation text shown under the error message.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        match &mut self {
            Self::Runtime { help_text, .. }
            | Self::Input { help_text, .. }
            | Self::Validation { help_text, .. } => *help_text = Some(help.into()),
        }
        self
    }

    /// The user-facing message.
    pub fn message(&self) -> &str {
        match self {
            Self::Runtime { message, .. }
            | Self::Input { message, .. }
            | Self::Validation { message, .. } => message,
        }
    }

    /// Remediation text, falling back to the generic hint.
    pub fn help_text(&self) -> &str {
        match self {
            Self::Runtime { help_text, .. }
            | Self::Input { help_text, .. }
            | Self::Validation { help_text, .. } => {
                help_text.as_deref().unwrap_or(DEFAULT_HELP_TEXT)
            }
        }
    }

    /// The exit code for this error, a pure function of the kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Runtime { .. } => exit_code::RUNTIME_ERROR,
            Self::Input { .. } => exit_code::INPUT_ERROR,
            Self::Validation { .. } => exit_code::VALIDATION_ERROR,
        }
    }
}

impl From<std::io::Error> for TestamentError {
    fn from(err: std::io::Error) -> Self {
        Self::runtime(format!("IO error: {err}"))
    }
}
