//! Reading scenario files.

use std::path::Path;

use super::model::Scenario;
use crate::errors::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioFormat {
    Toml,
    Json,
}

impl ScenarioFormat {
    /// `.json` files are JSON; everything else is read as TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ScenarioFormat::Json,
            _ => ScenarioFormat::Toml,
        }
    }
}

pub fn parse_scenario(text: &str, format: ScenarioFormat) -> anyhow::Result<Scenario> {
    let parsed = match format {
        ScenarioFormat::Toml => toml::from_str(text).map_err(|e| e.to_string()),
        ScenarioFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
    };
    parsed.map_err(|e| CliError::invalid_input(format!("Invalid scenario: {}", e)).into())
}

/// Load a scenario; its name defaults to the file stem.
pub fn load_scenario(path: &Path) -> anyhow::Result<Scenario> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read scenario {}: {}", path.display(), e))?;
    let mut scenario = parse_scenario(&text, ScenarioFormat::from_path(path))
        .map_err(|e| anyhow::Error::from(CliError::invalid_input(format!("{}: {}", path.display(), e))))?;
    if scenario.name.is_none() {
        scenario.name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string);
    }
    tracing::debug!(
        path = %path.display(),
        steps = scenario.steps.len(),
        "loaded scenario"
    );
    Ok(scenario)
}
