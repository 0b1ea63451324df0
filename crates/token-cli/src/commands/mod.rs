//! Command handlers, one module per subcommand.

mod check;
mod init;
mod misc;
mod run;

pub use check::handle_check;
pub use init::handle_init;
pub use misc::handle_completions;
pub use run::handle_run;
