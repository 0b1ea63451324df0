use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::app::{resolve_scenario_path, AppContext};
use crate::cli::RunArgs;
use crate::output::{print_report, report_json};
use crate::runner::{run_scenario, Report};
use crate::scenario::load_scenario;
use crate::ui::validate_format;

pub fn handle_run(app: &AppContext, args: &RunArgs) -> anyhow::Result<()> {
    validate_format(args.json, args.format.as_deref())?;
    let path = resolve_scenario_path(&args.scenario)?;
    let scenario = load_scenario(&path)?;
    let config = app.config()?;

    let report = run_scenario(&scenario, u128::from(config.defaults.initial_supply))?;

    if let Some(events_path) = args.events.as_deref() {
        export_events(&report, Path::new(events_path))?;
    }

    let ctx = app.ui_context(args.json, args.format.as_deref());
    if ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
    } else if !app.quiet() {
        print_report(&ctx, &report, config.token.decimals);
    }

    report.outcome()
}

/// Write every event the run emitted as JSON lines.
fn export_events(report: &Report, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .map_err(|e| anyhow::anyhow!("Failed to create {}: {}", path.display(), e))?;
    let events = report.ledger.events();
    events
        .write_jsonl(BufWriter::new(file))
        .map_err(|e| anyhow::anyhow!("Failed to write events to {}: {}", path.display(), e))?;
    tracing::info!(path = %path.display(), events = events.len(), "exported events");
    Ok(())
}
