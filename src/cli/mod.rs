//! CLI module for mcviz.
//!
//! This module contains all CLI logic extracted from main.rs to enable
//! full test coverage. The entry point `run_cli` can be called from main.rs
//! with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, SimFlags};
pub use commands::{run_cli, run_from_config, run_from_flags, validate_config};
pub use output::{print_help, print_run_summary, print_summary_json, print_version};
