//! Output mode routing logic.

use crate::errors::CliError;

/// Output mode determines how results are formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Machine-readable JSON report only
    Json,
    /// Plain `key=value` lines, stable for logs and scripts
    #[default]
    Plain,
    /// Tables, badges and colors (TTY only)
    Pretty,
}

/// Accepted values of `--format` and `[ui] format`.
pub const FORMATS: [&str; 2] = ["table", "plain"];

impl OutputMode {
    /// Resolve output mode from flags and environment.
    ///
    /// Routing rules:
    /// 1. `--json` overrides everything
    /// 2. `--format plain` forces plain
    /// 3. `TERM=dumb` forces plain
    /// 4. Pretty only when stdout is a TTY
    pub fn resolve(
        json_flag: bool,
        format_flag: Option<&str>,
        is_tty: bool,
        term_is_dumb: bool,
    ) -> Self {
        if json_flag {
            return Self::Json;
        }
        if format_flag == Some("plain") || term_is_dumb {
            return Self::Plain;
        }
        if is_tty {
            Self::Pretty
        } else {
            Self::Plain
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}

/// Reject unknown `--format` values and `--format` combined with `--json`.
pub fn validate_format(json_flag: bool, format_flag: Option<&str>) -> anyhow::Result<()> {
    let Some(format) = format_flag else {
        return Ok(());
    };
    if json_flag {
        return Err(CliError::invalid_input("--format cannot be used with --json").into());
    }
    if !FORMATS.contains(&format) {
        return Err(CliError::invalid_input(format!(
            "Unknown format \"{}\" (expected one of: {})",
            format,
            FORMATS.join(", ")
        ))
        .into());
    }
    Ok(())
}
