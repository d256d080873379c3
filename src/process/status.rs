//! Labeled fields of `/proc/<pid>/status`.

use crate::error::Result;
use crate::fields::{labeled_kb, labeled_value};
use crate::paths::ProcPaths;
use crate::source::read_proc_file;
use crate::Pid;
use std::path::Path;

const VM_SIZE: &str = "VmSize:";
const UID: &str = "Uid:";
const THREADS: &str = "Threads:";

/// KB per binary megabyte.
pub const KB_PER_MB: f64 = 1024.0;

/// Parses `VmSize:` in KB.
pub fn parse_vm_size_kb(path: &Path, content: &str) -> Result<u64> {
    labeled_kb(path, content, VM_SIZE)
}

/// Parses the real uid, the first of the four ids on the `Uid:` line.
pub fn parse_real_uid(path: &Path, content: &str) -> Result<u32> {
    labeled_value(path, content, UID)
}

/// Parses `Threads:`.
pub fn parse_threads(path: &Path, content: &str) -> Result<u64> {
    labeled_value(path, content, THREADS)
}

/// Virtual memory size of a process in binary megabytes.
///
/// Kernel threads have no `VmSize:` line and report `FieldNotFound`.
pub fn read_virtual_memory_mb(paths: &ProcPaths, pid: Pid) -> Result<f64> {
    let path = paths.status(pid);
    let content = read_proc_file(&path)?;
    Ok(parse_vm_size_kb(&path, &content)? as f64 / KB_PER_MB)
}

pub fn read_real_uid(paths: &ProcPaths, pid: Pid) -> Result<u32> {
    let path = paths.status(pid);
    let content = read_proc_file(&path)?;
    parse_real_uid(&path, &content)
}

pub fn read_thread_count(paths: &ProcPaths, pid: Pid) -> Result<u64> {
    let path = paths.status(pid);
    let content = read_proc_file(&path)?;
    parse_threads(&path, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcError;

    const STATUS: &str = "Name:\tsshd\n\
                          State:\tS (sleeping)\n\
                          Pid:\t812\n\
                          Uid:\t0\t0\t0\t0\n\
                          Gid:\t0\t0\t0\t0\n\
                          VmPeak:\t  215000 kB\n\
                          VmSize:\t  204800 kB\n\
                          VmRSS:\t    7936 kB\n\
                          Threads:\t1\n";

    #[test]
    fn test_parse_vm_size() {
        let kb = parse_vm_size_kb(Path::new("status"), STATUS).unwrap();
        assert_eq!(kb, 204800);
        assert_eq!(kb as f64 / KB_PER_MB, 200.0);
    }

    #[test]
    fn test_parse_vm_size_kernel_thread() {
        let content = "Name:\tkworker/0:1\nUid:\t0\t0\t0\t0\nThreads:\t1\n";
        let err = parse_vm_size_kb(Path::new("status"), content).unwrap_err();
        assert!(matches!(err, ProcError::FieldNotFound { .. }));
    }

    #[test]
    fn test_parse_real_uid_takes_first_id() {
        let content = "Uid:\t1000\t0\t0\t0\n";
        assert_eq!(parse_real_uid(Path::new("status"), content).unwrap(), 1000);
        assert_eq!(parse_real_uid(Path::new("status"), STATUS).unwrap(), 0);
    }

    #[test]
    fn test_parse_threads() {
        assert_eq!(parse_threads(Path::new("status"), STATUS).unwrap(), 1);
        let err = parse_threads(Path::new("status"), "Name:\tx\n").unwrap_err();
        assert!(matches!(err, ProcError::FieldNotFound { .. }));
    }
}
