use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{write_config, TokenConfig};
use crate::errors::CliError;
use crate::ui::{self, format_amount, Badge, UiContext};

pub fn handle_init(app: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let path = resolve_config_path(app.cli())?;
    if path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        ))
        .into());
    }

    let config = TokenConfig::new(
        args.name.clone(),
        args.symbol.clone(),
        args.decimals,
        args.initial_supply,
    );
    write_config(&path, &config)?;
    tracing::info!(path = %path.display(), "wrote config");

    if app.quiet() {
        return Ok(());
    }
    let ctx = UiContext::from_env(false, None, app.cli().no_color, app.cli().ascii);
    let items = [
        ("path", path.display().to_string()),
        ("name", config.token.name.clone()),
        ("symbol", config.token.symbol.clone()),
        ("decimals", config.token.decimals.to_string()),
        (
            "initial supply",
            format_amount(
                u128::from(config.defaults.initial_supply),
                config.token.decimals,
            ),
        ),
    ];
    ui::print(&ctx, &ui::receipt(&ctx, Badge::Pass, "Config written", &items));
    Ok(())
}
