//! Processes command implementation.
//!
//! Lists per-process snapshots, or shows a single process.

use crate::cli::OutputFormat;
use crate::commands::emit_structured;
use crate::config::Config;
use procinfo_reader::format::format_optional;
use procinfo_reader::ProcessSnapshot;

const COMMAND_WIDTH: usize = 60;

fn print_header() {
    println!(
        "{:>7}  {:<12}  {:>10}  {:>7}  {:>12}  {:>4}  COMMAND",
        "PID", "USER", "VSZ(MB)", "CPU%", "UPTIME", "THR"
    );
}

fn print_row(p: &ProcessSnapshot, precision: usize) {
    let user = p.user.clone().unwrap_or_else(|| p.uid.to_string());
    let mut command = p.command.clone();
    if command.chars().count() > COMMAND_WIDTH {
        command = command.chars().take(COMMAND_WIDTH - 1).collect();
        command.push('…');
    }
    println!(
        "{:>7}  {:<12}  {:>10}  {:>7}  {:>12}  {:>4}  {}",
        p.pid,
        user,
        format_optional(p.virtual_memory_mb, precision),
        format_optional(p.cpu_percent, precision),
        p.up_time_ticks,
        p.threads,
        command
    );
}

/// Lists processes.
pub fn command_processes(
    limit: Option<usize>,
    format: OutputFormat,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let reader = config.reader();
    let max = limit.or(config.max_processes);
    let snapshots = reader.process_snapshots(max)?;

    if emit_structured(&snapshots, format)? {
        return Ok(());
    }

    print_header();
    for p in &snapshots {
        print_row(p, config.precision());
    }
    println!("\n{} processes", snapshots.len());
    Ok(())
}

/// Shows one process.
pub fn command_process(
    pid: u32,
    format: OutputFormat,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let reader = config.reader();
    if !reader.pid_exists(pid)? {
        return Err(format!("No process with pid {}", pid).into());
    }
    let snapshot = reader.process_snapshot(pid)?;

    if emit_structured(&snapshot, format)? {
        return Ok(());
    }

    print_header();
    print_row(&snapshot, config.precision());
    Ok(())
}
