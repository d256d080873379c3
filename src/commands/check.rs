//! Check command implementation.
//!
//! Validates that every source file can be read and parsed.

use std::fmt::Display;
use std::path::Path;

use crate::config::{validate_effective_config, Config};
use procinfo_reader::paths::DEFAULT_PROC_ROOT;
use procinfo_reader::{ProcError, ProcessInfoReader};

fn report<T: Display>(label: &str, result: Result<T, ProcError>, all_ok: &mut bool) {
    match result {
        Ok(v) => println!("   ✅ {}: {}", label, v),
        Err(e) => {
            println!("   ❌ {}: {}", label, e);
            *all_ok = false;
        }
    }
}

fn check_system(reader: &ProcessInfoReader, all_ok: &mut bool) {
    report("uptime", reader.system_uptime(), all_ok);
    report("kernel", reader.kernel_version(), all_ok);
    report("os name", reader.os_name(), all_ok);
    report("cores", reader.core_count(), all_ok);
    report("processes", reader.total_processes(), all_ok);
    report("running", reader.running_processes(), all_ok);
    report(
        "cpu line",
        reader.cpu_snapshot(None).map(|s| s.tokens().join(" ")),
        all_ok,
    );
    report(
        "memory info",
        reader
            .memory_info()
            .map(|m| format!("{} kB available", m.available_kb)),
        all_ok,
    );
}

fn check_own_process(reader: &ProcessInfoReader, all_ok: &mut bool) {
    let pid = std::process::id();
    report("own pid listed", reader.pid_exists(pid), all_ok);
    report("command", reader.command(pid), all_ok);
    report("virtual memory MB", reader.virtual_memory_mb(pid), all_ok);
    report("threads", reader.thread_count(pid), all_ok);
    report(
        "owner",
        reader
            .owning_user(pid)
            .map(|u| u.unwrap_or_else(|| "<no account record>".to_string())),
        all_ok,
    );
    report("cpu times", reader.cpu_times(pid).map(|t| t.total_ticks()), all_ok);
}

/// Validates source files and configuration.
pub fn command_check(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 procinfo-reader - Source Check");
    println!("=================================");

    let mut all_ok = true;
    let reader = config.reader();

    println!("\n📁 Enumerating {}...", reader.paths().root().display());
    match reader.list_pids() {
        Ok(pids) if !pids.is_empty() => println!("   ✅ {} process entries", pids.len()),
        Ok(_) => {
            println!("   ❌ No process entries found");
            all_ok = false;
        }
        Err(e) => {
            println!("   ❌ {}", e);
            all_ok = false;
        }
    }

    println!("\n🖥️  System files...");
    check_system(&reader, &mut all_ok);

    // Only meaningful when reading the live root this process appears in
    if reader.paths().root() == Path::new(DEFAULT_PROC_ROOT) {
        println!("\n⚙️  Own process files...");
        check_own_process(&reader, &mut all_ok);
    }

    println!("\n⚙️  Checking configuration...");
    match validate_effective_config(config) {
        Ok(_) => println!("   ✅ Configuration is valid"),
        Err(e) => {
            println!("   ❌ Configuration invalid: {}", e);
            all_ok = false;
        }
    }

    println!("\n📋 Summary:");
    if all_ok {
        println!("   ✅ All checks passed");
        Ok(())
    } else {
        println!("   ❌ Some checks failed - please review the output above");
        std::process::exit(1);
    }
}
