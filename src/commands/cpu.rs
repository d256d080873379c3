//! CPU command implementation.
//!
//! Takes two snapshots of /proc/stat one interval apart and prints the usage
//! in between.

use std::thread;
use std::time::Duration;

use crate::config::Config;
use procinfo_reader::format::format_optional;
use procinfo_reader::{cpu_percent_between, CpuSampler};
use tracing::debug;

/// Measures CPU usage over the configured interval.
pub fn command_cpu(
    core: Option<usize>,
    all_cores: bool,
    interval_ms: Option<u64>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let reader = config.reader();
    let interval = Duration::from_millis(interval_ms.unwrap_or_else(|| config.cpu_interval_ms()));
    let precision = config.precision();

    if all_cores {
        let mut sampler = CpuSampler::new();
        sampler.update(reader.cpu_snapshots()?);
        thread::sleep(interval);
        let current = reader.cpu_snapshots()?;
        let labels: Vec<String> = current.iter().map(|s| s.label.clone()).collect();
        let usage = sampler.update(current);

        // Print in /proc/stat order
        for label in labels {
            println!(
                "{:<6} {:>7} %",
                label,
                format_optional(usage.get(&label).copied(), precision)
            );
        }
        return Ok(());
    }

    let before = reader.cpu_snapshot(core)?;
    thread::sleep(interval);
    let after = reader.cpu_snapshot(core)?;
    debug!(
        "{}: active {} -> {}, idle {} -> {}",
        before.label,
        before.active(),
        after.active(),
        before.idle(),
        after.idle()
    );

    println!(
        "{:<6} {:>7} %",
        after.label,
        format_optional(cpu_percent_between(&before, &after), precision)
    );
    Ok(())
}
