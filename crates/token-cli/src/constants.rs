//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, also clap usage errors)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const FAILURE: i32 = 1;

    /// Resource not found (config, scenario file).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or malformed scenario.
    pub const INVALID_INPUT: i32 = 4;

    /// A scenario ran but at least one expectation failed.
    pub const SCENARIO_FAILED: i32 = 6;
}

/// Label that always resolves to the zero address.
pub const ZERO_LABEL: &str = "zero";

/// Label of the deploying account when a scenario names none.
pub const DEFAULT_HOLDER_LABEL: &str = "owner";

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "TOKEN_LOG";
