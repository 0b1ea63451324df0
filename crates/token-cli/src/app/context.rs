//! Application context for the token CLI.
//!
//! Provides a unified context that combines CLI arguments with the
//! lazily-loaded config file.

use once_cell::unsync::OnceCell;

use crate::cli::Cli;
use crate::config::{read_config_or_default, TokenConfig};
use crate::ui::UiContext;

use super::resolver::resolve_config_path;

/// Application context that bundles CLI args with configuration.
///
/// This avoids repeatedly loading config and threading multiple parameters
/// through handler functions.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<TokenConfig>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the configuration, loading it lazily if needed.
    pub fn config(&self) -> anyhow::Result<&TokenConfig> {
        self.config.get_or_try_init(|| {
            let path = resolve_config_path(self.cli)?;
            read_config_or_default(&path)
        })
    }

    /// Build a UI context for a command's output flags.
    ///
    /// A `--format` flag wins over the config's `[ui] format`.
    pub fn ui_context(&self, json: bool, format: Option<&str>) -> UiContext {
        let configured = self
            .config()
            .ok()
            .and_then(|config| config.ui.format.clone());
        let format = format.map(str::to_string).or(configured);
        UiContext::from_env(json, format.as_deref(), self.cli.no_color, self.cli.ascii)
    }
}
