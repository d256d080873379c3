//! Path construction for the process-information root.
//!
//! Every reader goes through [`ProcPaths`] so the whole crate can be pointed at
//! a directory that mimics `/proc` (tests, containers with a bind-mounted host
//! proc).

use crate::Pid;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_PROC_ROOT: &str = "/proc";
pub const DEFAULT_PASSWD_PATH: &str = "/etc/passwd";

const CMDLINE: &str = "cmdline";
const STATUS: &str = "status";
const STAT: &str = "stat";
const UPTIME: &str = "uptime";
const VERSION: &str = "version";
const CPUINFO: &str = "cpuinfo";
const MEMINFO: &str = "meminfo";

/// Locations of every file the reader touches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcPaths {
    root: PathBuf,
    passwd: PathBuf,
}

impl Default for ProcPaths {
    fn default() -> Self {
        Self::new(DEFAULT_PROC_ROOT, DEFAULT_PASSWD_PATH)
    }
}

impl ProcPaths {
    pub fn new(root: impl Into<PathBuf>, passwd: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            passwd: passwd.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn passwd(&self) -> &Path {
        &self.passwd
    }

    pub fn process_dir(&self, pid: Pid) -> PathBuf {
        self.root.join(pid.to_string())
    }

    pub fn cmdline(&self, pid: Pid) -> PathBuf {
        self.process_dir(pid).join(CMDLINE)
    }

    pub fn status(&self, pid: Pid) -> PathBuf {
        self.process_dir(pid).join(STATUS)
    }

    pub fn process_stat(&self, pid: Pid) -> PathBuf {
        self.process_dir(pid).join(STAT)
    }

    pub fn uptime(&self) -> PathBuf {
        self.root.join(UPTIME)
    }

    pub fn version(&self) -> PathBuf {
        self.root.join(VERSION)
    }

    pub fn cpuinfo(&self) -> PathBuf {
        self.root.join(CPUINFO)
    }

    pub fn stat(&self) -> PathBuf {
        self.root.join(STAT)
    }

    pub fn meminfo(&self) -> PathBuf {
        self.root.join(MEMINFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let paths = ProcPaths::default();
        assert_eq!(paths.status(1), PathBuf::from("/proc/1/status"));
        assert_eq!(paths.process_stat(812), PathBuf::from("/proc/812/stat"));
        assert_eq!(paths.cmdline(7), PathBuf::from("/proc/7/cmdline"));
        assert_eq!(paths.meminfo(), PathBuf::from("/proc/meminfo"));
        assert_eq!(paths.passwd(), Path::new("/etc/passwd"));
    }

    #[test]
    fn test_custom_root() {
        let paths = ProcPaths::new("/host/proc", "/host/etc/passwd");
        assert_eq!(paths.stat(), PathBuf::from("/host/proc/stat"));
        assert_eq!(paths.process_dir(3), PathBuf::from("/host/proc/3"));
    }
}
