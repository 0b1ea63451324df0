//! UI primitives for the token CLI.
//!
//! - **Context**: Environment detection (TTY, width, color, unicode)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badges and color styles
//! - **Render**: Tables, headers, receipts, hints
//! - **Format**: Amount and address formatting

mod context;
pub mod format;
mod mode;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use mode::{validate_format, OutputMode};
pub use theme::Badge;

pub use render::{badge, header, hint, kv, print, print_error, receipt, table, Column};

pub use format::{format_amount, format_delta, short_address, truncate};
