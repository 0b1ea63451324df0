//! Token CLI - deploy a fungible-token ledger and replay scenarios against it
//!
//! This is the command-line harness for the token core. A scenario file
//! describes a deployment and a list of calls with the outcomes each call
//! must produce; `token run` executes it and reports every expectation that
//! did not hold.

use clap::Parser;

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod logging;
mod output;
mod runner;
mod scenario;
mod ui;

use app::AppContext;
use cli::{Cli, Commands};
use errors::{exit_code_for, CliError};
use ui::UiContext;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(&cli) {
        report_error(&cli, &err);
        std::process::exit(exit_code_for(&err));
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let app = AppContext::new(cli);
    match &cli.command {
        Some(Commands::Run(args)) => commands::handle_run(&app, args),
        Some(Commands::Check(args)) => commands::handle_check(&app, args),
        Some(Commands::Init(args)) => commands::handle_init(&app, args),
        Some(Commands::Completions(args)) => commands::handle_completions(args.shell),
        None => {
            print_quickstart(cli);
            Ok(())
        }
    }
}

/// Errors go to stderr; a `ScenarioFailed` report has already been printed.
fn report_error(cli: &Cli, err: &anyhow::Error) {
    let ctx = UiContext::from_env(false, None, cli.no_color, cli.ascii);
    match err.downcast_ref::<CliError>() {
        Some(CliError::NotFound { message, hint }) => {
            ui::print_error(&ctx, message, Some(hint));
        }
        Some(CliError::ScenarioFailed { .. }) if cli.quiet => {}
        _ => ui::print_error(&ctx, &format!("{:#}", err), None),
    }
}

fn print_quickstart(cli: &Cli) {
    if cli.quiet {
        return;
    }
    let ctx = UiContext::from_env(false, None, cli.no_color, cli.ascii);
    ui::print(&ctx, &ui::header(&ctx, "quickstart", None));
    ui::print(
        &ctx,
        &ui::kv(&ctx, "run", "token run demos/token.toml"),
    );
    ui::print(
        &ctx,
        &ui::kv(&ctx, "validate", "token check demos/token.toml"),
    );
    ui::print(&ctx, &ui::kv(&ctx, "configure", "token init --symbol TKN"));
    ui::print(&ctx, &ui::hint(&ctx, "Run `token --help` for all options."));
}
