//! CLI command implementations for procinfo-reader.
//!
//! This module provides implementations for all CLI subcommands:
//! - `system`: System-wide snapshot
//! - `processes`: Per-process snapshots (list or single pid)
//! - `cpu`: Two-sample CPU usage
//! - `check`: Source validation
//! - `config`: Configuration file generation

pub mod check;
pub mod config;
pub mod cpu;
pub mod processes;
pub mod system;

// Re-export command functions
pub use check::command_check;
pub use config::command_config;
pub use cpu::command_cpu;
pub use processes::{command_process, command_processes};
pub use system::command_system;

use crate::cli::OutputFormat;
use serde::Serialize;

/// Prints a value as JSON or YAML. Returns false for text output, which each
/// command renders itself.
pub(crate) fn emit_structured<T: Serialize>(
    value: &T,
    format: OutputFormat,
) -> Result<bool, Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
        OutputFormat::Text => return Ok(false),
    }
    Ok(true)
}
