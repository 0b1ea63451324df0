//! Report rendering for the CLI.
//!
//! `json` builds the machine-readable report; `text` renders tables for a
//! terminal and `key=value` lines for everything else.

mod json;
mod text;

pub use json::{amount_json, delta_json, event_json, report_json};
pub use text::print_report;
