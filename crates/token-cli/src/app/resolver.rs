//! Path resolution for config and scenario files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::default_config_path;
use crate::errors::CliError;

/// Resolve the config file path: `--config`/`TOKEN_CONFIG` first, then XDG.
pub fn resolve_config_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    if let Some(value) = cli.config.as_deref() {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve a scenario argument to an existing file.
pub fn resolve_scenario_path(raw: &str) -> anyhow::Result<PathBuf> {
    let path = PathBuf::from(raw);
    if !path.is_file() {
        return Err(CliError::not_found(
            format!("No scenario found at {}", path.display()),
            missing_scenario_hint(&path),
        )
        .into());
    }
    Ok(path)
}

fn missing_scenario_hint(path: &Path) -> String {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ".".to_string());
    format!(
        "Scenario files are .toml or .json. Check the path, or list {} for available files.",
        dir
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_scenario_is_not_found() {
        let err = resolve_scenario_path("/definitely/not/here.toml").unwrap_err();
        let cli_err = err.downcast_ref::<CliError>().expect("should be a CliError");
        assert!(matches!(cli_err, CliError::NotFound { .. }));
        assert!(err.to_string().contains("/definitely/not"));
    }

    #[test]
    fn test_existing_scenario_resolves() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = resolve_scenario_path(file.path().to_str().unwrap()).unwrap();
        assert_eq!(path, file.path());
    }
}
