//! System-wide metrics collection from the process-information root.
//!
//! This module provides functions to read uptime, kernel and OS identification,
//! core count and process counters. CPU counters live in [`cpu`] and memory
//! figures in [`memory`].

pub mod cpu;
pub mod memory;

use crate::error::Result;
use crate::fields::{keyed_value, parse_token, positional};
use crate::paths::ProcPaths;
use crate::source::read_proc_file;
use serde::Serialize;
use std::fmt;
use std::path::Path;

pub use cpu::{cpu_percent_between, CpuField, CpuSampler, CpuSnapshot};
pub use memory::{MemoryFormula, MemoryInfo};

const CPU_CORES_LABEL: &str = "cpu cores\t:";
const PROCESSES_KEY: &str = "processes";
const PROCS_RUNNING_KEY: &str = "procs_running";

/// Kernel release and build tag, tokens 3 and 4 of the version file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KernelVersion {
    pub release: String,
    pub build: String,
}

/// Release and build separated by one space, e.g. `5.4.0-42-generic #46`.
/// The tokens are deliberately not concatenated, which would run the release
/// into the `#` build tag.
impl fmt::Display for KernelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.release, self.build)
    }
}

/// Parses the uptime file.
///
/// Format: "<uptime_seconds> <idle_seconds>"
pub fn parse_uptime(path: &Path, content: &str) -> Result<f64> {
    let token = positional(path, content, 1)?;
    parse_token(path, "uptime", token)
}

/// Reads system uptime in seconds.
pub fn read_uptime(paths: &ProcPaths) -> Result<f64> {
    let path = paths.uptime();
    let content = read_proc_file(&path)?;
    parse_uptime(&path, &content)
}

pub fn parse_kernel_version(path: &Path, content: &str) -> Result<KernelVersion> {
    Ok(KernelVersion {
        release: positional(path, content, 3)?.to_string(),
        build: positional(path, content, 4)?.to_string(),
    })
}

pub fn read_kernel_version(paths: &ProcPaths) -> Result<KernelVersion> {
    let path = paths.version();
    let content = read_proc_file(&path)?;
    parse_kernel_version(&path, &content)
}

/// Extracts the distribution name from tokens 9 and 10 of the version file.
///
/// The pair looks like `(Ubuntu 9.4.0))`: one opening parenthesis is removed
/// from the front and up to two closing ones from the back.
pub fn parse_os_name(path: &Path, content: &str) -> Result<String> {
    let joined = format!(
        "{} {}",
        positional(path, content, 9)?,
        positional(path, content, 10)?
    );
    let mut name = joined.strip_prefix('(').unwrap_or(joined.as_str());
    for _ in 0..2 {
        name = name.strip_suffix(')').unwrap_or(name);
    }
    Ok(name.to_string())
}

pub fn read_os_name(paths: &ProcPaths) -> Result<String> {
    let path = paths.version();
    let content = read_proc_file(&path)?;
    parse_os_name(&path, &content)
}

/// Counts `cpu cores` lines in cpuinfo, one per logical processor block.
///
/// Architectures that do not publish the label yield 0.
pub fn count_cores(content: &str) -> usize {
    content
        .lines()
        .filter(|line| line.starts_with(CPU_CORES_LABEL))
        .count()
}

pub fn read_core_count(paths: &ProcPaths) -> Result<usize> {
    let content = read_proc_file(&paths.cpuinfo())?;
    Ok(count_cores(&content))
}

/// Total processes created since boot (`processes` line of /proc/stat).
pub fn read_total_processes(paths: &ProcPaths) -> Result<u64> {
    let path = paths.stat();
    let content = read_proc_file(&path)?;
    keyed_value(&path, &content, PROCESSES_KEY)
}

/// Processes currently runnable (`procs_running` line of /proc/stat).
pub fn read_running_processes(paths: &ProcPaths) -> Result<u64> {
    let path = paths.stat();
    let content = read_proc_file(&path)?;
    keyed_value(&path, &content, PROCS_RUNNING_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcError;

    const VERSION: &str = "Linux version 5.4.0-42-generic (buildd@lcy01) (gcc 9.4.0 \
                           (Ubuntu 9.4.0)) #46-Ubuntu SMP Fri Jul 10 00:24:02 UTC 2020\n";

    #[test]
    fn test_parse_uptime() {
        let uptime = parse_uptime(Path::new("uptime"), "350735.47 234388.90\n").unwrap();
        assert!((uptime - 350735.47).abs() < 1e-9);
        assert!(parse_uptime(Path::new("uptime"), "").is_err());
        assert!(parse_uptime(Path::new("uptime"), "abc 1.0").is_err());
    }

    #[test]
    fn test_parse_kernel_version() {
        let kv = parse_kernel_version(Path::new("version"), VERSION).unwrap();
        assert_eq!(kv.release, "5.4.0-42-generic");
        assert_eq!(kv.build, "(buildd@lcy01)");
        assert_eq!(kv.to_string(), "5.4.0-42-generic (buildd@lcy01)");
    }

    #[test]
    fn test_parse_os_name() {
        let line = "Linux version 5.4.0 #1 SMP Tue Jan 1 (Ubuntu 9.4.0) 2020";
        assert_eq!(
            parse_os_name(Path::new("version"), line).unwrap(),
            "Ubuntu 9.4.0"
        );
        // Double closing parenthesis as the kernel prints after the gcc banner
        let line = "Linux version 5.4.0 #1 SMP Tue Jan 1 (Ubuntu 9.4.0)) 2020";
        assert_eq!(
            parse_os_name(Path::new("version"), line).unwrap(),
            "Ubuntu 9.4.0"
        );
    }

    #[test]
    fn test_parse_os_name_short_line() {
        let err = parse_os_name(Path::new("version"), "Linux version 5.4.0").unwrap_err();
        assert!(matches!(err, ProcError::FieldNotFound { .. }));
    }

    #[test]
    fn test_count_cores() {
        let cpuinfo = "processor\t: 0\ncpu cores\t: 2\n\nprocessor\t: 1\ncpu cores\t: 2\n";
        assert_eq!(count_cores(cpuinfo), 2);
        assert_eq!(count_cores("processor\t: 0\nBogoMIPS\t: 48.00\n"), 0);
    }
}
