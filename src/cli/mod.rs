//! CLI module for mechsim.
//!
//! All CLI logic lives here rather than in main.rs so it can be tested.
//! The entry point `run_cli` is called from main.rs with parsed arguments.

mod args;
mod commands;
mod output;
mod scenario_file;

pub use args::{Args, Command, OutputFormat};
pub use commands::{classify_scenario, run_cli, run_scenario};
pub use output::{print_help, print_version, version_string, write_trajectory};
pub use scenario_file::ScenarioFile;

#[cfg(test)]
mod tests;
