use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use token_core::VERSION;

/// Token - replay fungible-token scenarios against the ledger core
#[derive(Parser)]
#[command(name = "token")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true, env = "TOKEN_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,
}

/// Arguments for the `run` command
#[derive(Args)]
pub struct RunArgs {
    /// Scenario file (.toml or .json)
    #[arg(value_name = "SCENARIO")]
    pub scenario: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Write the emitted events as JSON lines to this path
    #[arg(long, value_name = "PATH")]
    pub events: Option<String>,
}

/// Arguments for the `check` command
#[derive(Args)]
pub struct CheckArgs {
    /// Scenario file (.toml or .json)
    #[arg(value_name = "SCENARIO")]
    pub scenario: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,

    /// Token name
    #[arg(long)]
    pub name: Option<String>,

    /// Token symbol
    #[arg(long)]
    pub symbol: Option<String>,

    /// Display decimals
    #[arg(long)]
    pub decimals: Option<u8>,

    /// Default initial supply for scenarios that omit one
    #[arg(long)]
    pub initial_supply: Option<u64>,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Deploy a ledger and replay a scenario against it
    Run(RunArgs),

    /// Validate a scenario file without running it
    Check(CheckArgs),

    /// Write a config file with defaults
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
