//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, scenario file)
    NotFound { message: String, hint: String },

    /// Invalid user input or malformed scenario
    InvalidInput(String),

    /// Scenario expectations did not hold
    ScenarioFailed { failed: usize, total: usize },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
            CliError::ScenarioFailed { failed, total } => {
                write!(f, "Scenario failed: {} of {} steps did not pass", failed, total)
            }
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use super::constants::exit_codes;
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::ScenarioFailed { .. } => exit_codes::SCENARIO_FAILED,
        }
    }
}

/// Exit code for any error returned from a command handler.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CliError>()
        .map(CliError::exit_code)
        .unwrap_or(super::constants::exit_codes::FAILURE)
}
