use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default supply for scenarios whose `[deploy]` table omits one.
pub const DEFAULT_INITIAL_SUPPLY: u64 = 100_000;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TokenConfig {
    #[serde(default)]
    pub token: TokenSection,
    #[serde(default)]
    pub defaults: DefaultsSection,
    #[serde(default)]
    pub ui: UiSection,
}

/// Presentation metadata. The ledger itself never reads these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSection {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Default for TokenSection {
    fn default() -> Self {
        Self {
            name: "Token".to_string(),
            symbol: "TKN".to_string(),
            decimals: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsSection {
    pub initial_supply: u64,
}

impl Default for DefaultsSection {
    fn default() -> Self {
        Self {
            initial_supply: DEFAULT_INITIAL_SUPPLY,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiSection {
    pub format: Option<String>,
}

impl TokenConfig {
    pub fn new(
        name: Option<String>,
        symbol: Option<String>,
        decimals: Option<u8>,
        initial_supply: Option<u64>,
    ) -> Self {
        let mut config = Self::default();
        if let Some(name) = name {
            config.token.name = name;
        }
        if let Some(symbol) = symbol {
            config.token.symbol = symbol;
        }
        if let Some(decimals) = decimals {
            config.token.decimals = decimals;
        }
        if let Some(supply) = initial_supply {
            config.defaults.initial_supply = supply;
        }
        config
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn read_config(path: &Path) -> anyhow::Result<TokenConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

/// Read the config at `path`, falling back to defaults when it does not exist.
pub fn read_config_or_default(path: &Path) -> anyhow::Result<TokenConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(TokenConfig::default());
    }
    read_config(path)
}

pub fn write_config(path: &Path, config: &TokenConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("token"));
        }
    }
    Ok(home_dir()?.join(".config").join("token"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
