use serde_json::json;

use crate::app::{resolve_scenario_path, AppContext};
use crate::cli::CheckArgs;
use crate::output::amount_json;
use crate::scenario::{load_scenario, Accounts};
use crate::ui::{self, format_amount, Badge};

/// Parse a scenario and resolve its labels without running it.
pub fn handle_check(app: &AppContext, args: &CheckArgs) -> anyhow::Result<()> {
    let path = resolve_scenario_path(&args.scenario)?;
    let scenario = load_scenario(&path)?;
    let accounts = Accounts::from_scenario(&scenario)?;
    let config = app.config()?;

    let initial_supply = scenario
        .deploy
        .initial_supply
        .map(|amount| amount.get())
        .unwrap_or_else(|| u128::from(config.defaults.initial_supply));
    let name = scenario.name.clone().unwrap_or_default();
    let labels: Vec<&str> = accounts.iter().map(|(label, _)| label).collect();

    let ctx = app.ui_context(args.json, None);
    if ctx.mode.is_json() {
        let value = json!({
            "scenario": name,
            "valid": true,
            "steps": scenario.steps.len(),
            "initial_supply": amount_json(initial_supply),
            "holder": scenario.holder_label(),
            "accounts": labels,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }
    if app.quiet() {
        return Ok(());
    }

    ui::print(&ctx, &ui::header(&ctx, "check", Some(&name)));
    let items = [
        ("steps", scenario.steps.len().to_string()),
        ("holder", scenario.holder_label().to_string()),
        (
            "initial supply",
            format_amount(initial_supply, config.token.decimals),
        ),
        ("accounts", labels.join(", ")),
    ];
    let (kind, title) = if scenario.steps.is_empty() {
        (Badge::Warn, "Scenario is valid but has no steps")
    } else {
        (Badge::Pass, "Scenario is valid")
    };
    ui::print(&ctx, &ui::receipt(&ctx, kind, title, &items));
    Ok(())
}
