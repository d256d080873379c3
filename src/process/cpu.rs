//! CPU time parsing for a single process.
//!
//! This module reads the positional fields of `/proc/<pid>/stat` and derives
//! the lifetime CPU percentage of a process.

use crate::error::{ProcError, Result};
use crate::fields::parse_token;
use crate::paths::ProcPaths;
use crate::source::read_proc_file;
use crate::Pid;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::path::Path;

/// Get system clock ticks per second (usually 100, but can vary).
fn get_clk_tck() -> f64 {
    #[cfg(unix)]
    {
        // SAFETY: sysconf is safe to call with _SC_CLK_TCK
        // Returns -1 on error, 0 if undefined - both are handled by the > 0 check
        unsafe {
            let tck = libc::sysconf(libc::_SC_CLK_TCK);
            if tck > 0 {
                return tck as f64;
            }
        }
    }
    // Fallback to common default for error cases or non-Unix platforms
    100.0
}

/// System clock ticks per second (for CPU time calculation).
pub static CLK_TCK: Lazy<f64> = Lazy::new(get_clk_tck);

// 1-based field numbers as documented in proc(5).
const FIELD_UTIME: usize = 14;
const FIELD_STIME: usize = 15;
const FIELD_CUTIME: usize = 16;
const FIELD_CSTIME: usize = 17;
const FIELD_STARTTIME: usize = 22;

/// CPU accounting fields of `/proc/<pid>/stat`, all in clock ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessCpuTimes {
    pub utime: u64,
    pub stime: u64,
    pub cutime: u64,
    pub cstime: u64,
    pub starttime: u64,
}

impl ProcessCpuTimes {
    /// Ticks spent by the process and its waited-for children, saturating at
    /// `u64::MAX`.
    pub fn total_ticks(&self) -> u64 {
        [self.utime, self.stime, self.cutime, self.cstime]
            .into_iter()
            .fold(0u64, u64::saturating_add)
    }
}

/// Fields of a stat line counted from field 3 (state) onwards.
///
/// The command name in field 2 may contain spaces and parentheses, so the
/// record is split after the last `)`.
fn fields_after_comm<'a>(path: &Path, content: &'a str) -> Result<Vec<&'a str>> {
    let end = content
        .rfind(')')
        .ok_or_else(|| ProcError::field_not_found(path, "comm"))?;
    Ok(content[end + 1..].split_whitespace().collect())
}

fn stat_field<'a>(path: &Path, fields: &[&'a str], field: usize) -> Result<&'a str> {
    fields
        .get(field - 3)
        .copied()
        .ok_or_else(|| ProcError::field_not_found(path, format!("field {}", field)))
}

fn stat_ticks(path: &Path, fields: &[&str], field: usize) -> Result<u64> {
    let token = stat_field(path, fields, field)?;
    parse_token(path, &format!("field {}", field), token)
}

/// Parses the CPU accounting fields from the contents of a stat file.
pub fn parse_cpu_times(path: &Path, content: &str) -> Result<ProcessCpuTimes> {
    let fields = fields_after_comm(path, content)?;
    Ok(ProcessCpuTimes {
        utime: stat_ticks(path, &fields, FIELD_UTIME)?,
        stime: stat_ticks(path, &fields, FIELD_STIME)?,
        cutime: stat_ticks(path, &fields, FIELD_CUTIME)?,
        cstime: stat_ticks(path, &fields, FIELD_CSTIME)?,
        starttime: stat_ticks(path, &fields, FIELD_STARTTIME)?,
    })
}

/// Reads the CPU accounting fields of a process.
pub fn read_cpu_times(paths: &ProcPaths, pid: Pid) -> Result<ProcessCpuTimes> {
    let path = paths.process_stat(pid);
    let content = read_proc_file(&path)?;
    parse_cpu_times(&path, &content)
}

/// Reads field 14 of the stat file, which the monitor shows as up time.
pub fn read_up_time_ticks(paths: &ProcPaths, pid: Pid) -> Result<u64> {
    let path = paths.process_stat(pid);
    let content = read_proc_file(&path)?;
    let fields = fields_after_comm(&path, &content)?;
    stat_ticks(&path, &fields, FIELD_UTIME)
}

/// Seconds the process has existed, given the system uptime in seconds.
pub fn runtime_seconds(times: &ProcessCpuTimes, system_uptime: f64, clk_tck: f64) -> f64 {
    system_uptime - times.starttime as f64 / clk_tck
}

/// Lifetime CPU usage of a process as a percentage of one core.
///
/// Returns `None` when the process runtime is not positive (a process started
/// within the same tick, or clock skew between the two files). The value is
/// not capped at 100: a multi-threaded process can use more than one core.
pub fn lifetime_cpu_percent(
    times: &ProcessCpuTimes,
    system_uptime: f64,
    clk_tck: f64,
) -> Option<f64> {
    let runtime = runtime_seconds(times, system_uptime, clk_tck);
    if runtime <= 0.0 || !runtime.is_finite() {
        return None;
    }
    let cpu_seconds = times.total_ticks() as f64 / clk_tck;
    Some(100.0 * cpu_seconds / runtime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    // Typical /proc/<pid>/stat format:
    // pid (comm) state ppid pgrp session tty_nr tpgid flags minflt cminflt majflt cmajflt utime stime cutime cstime ...
    const STAT: &str = "1234 (test_process) S 1 1234 1234 0 -1 4194304 100 0 0 0 1000 500 20 30 20 0 1 0 12345 12345678 1234 18446744073709551615 4194304 4238788 140736466511168 0 0 0 0 0 0 0 0 0 17 1 0 0 0 0 0";

    #[test]
    fn test_parse_cpu_times() {
        let times = parse_cpu_times(Path::new("stat"), STAT).unwrap();
        assert_eq!(
            times,
            ProcessCpuTimes {
                utime: 1000,
                stime: 500,
                cutime: 20,
                cstime: 30,
                starttime: 12345,
            }
        );
        assert_eq!(times.total_ticks(), 1550);
    }

    #[test]
    fn test_parse_cpu_times_comm_with_spaces() {
        let stat = STAT.replace("(test_process)", "(Web Content (1))");
        let times = parse_cpu_times(Path::new("stat"), &stat).unwrap();
        assert_eq!(times.utime, 1000);
        assert_eq!(times.starttime, 12345);
    }

    #[test]
    fn test_parse_cpu_times_invalid_stat() {
        let err = parse_cpu_times(Path::new("stat"), "1234 (test) S 1 2 3").unwrap_err();
        assert!(matches!(err, ProcError::FieldNotFound { .. }));

        let err = parse_cpu_times(Path::new("stat"), "1234 test S 1 2 3").unwrap_err();
        assert!(matches!(err, ProcError::FieldNotFound { .. }));
    }

    #[test]
    fn test_read_up_time_ticks() {
        let dir = tempdir().expect("Failed to create temp dir");
        std::fs::create_dir(dir.path().join("1234")).expect("Failed to create pid dir");
        std::fs::write(dir.path().join("1234/stat"), STAT).expect("Failed to write stat file");

        let paths = ProcPaths::new(dir.path(), "/etc/passwd");
        assert_eq!(read_up_time_ticks(&paths, 1234).unwrap(), 1000);
        assert!(read_up_time_ticks(&paths, 99).unwrap_err().is_unavailable());
    }

    #[test]
    fn test_lifetime_cpu_percent() {
        let times = ProcessCpuTimes {
            utime: 300,
            stime: 100,
            cutime: 50,
            cstime: 50,
            starttime: 1000,
        };
        // 500 ticks = 5s of CPU over (60 - 10)s of runtime
        let pct = lifetime_cpu_percent(&times, 60.0, 100.0).unwrap();
        assert!((pct - 10.0).abs() < 1e-9, "got {}", pct);
    }

    #[test]
    fn test_lifetime_cpu_percent_non_positive_runtime() {
        let times = ProcessCpuTimes {
            utime: 1,
            stime: 0,
            cutime: 0,
            cstime: 0,
            starttime: 6000,
        };
        assert_eq!(lifetime_cpu_percent(&times, 60.0, 100.0), None);
        assert_eq!(lifetime_cpu_percent(&times, 59.0, 100.0), None);
    }

    #[test]
    fn test_total_ticks_saturates_on_huge_counters() {
        let stat = STAT.replace(" 1000 500 20 30 ", " 18446744073709551615 1 20 30 ");
        let times = parse_cpu_times(Path::new("stat"), &stat).unwrap();
        assert_eq!(times.utime, u64::MAX);
        assert_eq!(times.total_ticks(), u64::MAX);

        let pct = lifetime_cpu_percent(&times, 1000.0, 100.0).unwrap();
        assert!(pct.is_finite() && pct > 0.0, "got {}", pct);
    }
}
