//! System command implementation.
//!
//! Prints the system-wide snapshot.

use crate::cli::OutputFormat;
use crate::commands::emit_structured;
use crate::config::Config;
use procinfo_reader::format::{format_decimal, format_optional};

/// Shows system-wide statistics.
pub fn command_system(
    format: OutputFormat,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let reader = config.reader();
    let snapshot = reader.system_snapshot()?;

    if emit_structured(&snapshot, format)? {
        return Ok(());
    }

    let precision = config.precision();
    println!("OS:                {}", snapshot.os_name);
    println!("Kernel:            {}", snapshot.kernel_version);
    println!(
        "Uptime:            {} s",
        format_decimal(snapshot.uptime_seconds, precision)
    );
    println!("Cores:             {}", snapshot.cores);
    println!(
        "Memory used:       {} %",
        format_optional(snapshot.ram_used_percent, precision)
    );
    println!(
        "  free/avail/buf:  {} / {} / {} kB",
        snapshot.memory.free_kb, snapshot.memory.available_kb, snapshot.memory.buffers_kb
    );
    println!("Total processes:   {}", snapshot.total_processes);
    println!("Running processes: {}", snapshot.running_processes);
    println!("Total threads:     {}", snapshot.total_threads);
    Ok(())
}
