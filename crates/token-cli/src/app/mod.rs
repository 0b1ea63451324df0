//! Application-level utilities for the token CLI.
//!
//! This module provides:
//! - Application context for unified CLI + config handling
//! - Path resolution for config and scenario files

mod context;
mod resolver;

// Re-export public API
pub use context::AppContext;
pub use resolver::{resolve_config_path, resolve_scenario_path};
