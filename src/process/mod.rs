//! Per-process readers.
//!
//! This module provides:
//! - `scanner`: pid enumeration and existence checks
//! - `cmdline`: command line of a process
//! - `status`: labeled fields of `/proc/<pid>/status` (VmSize, Uid, Threads)
//! - `cpu`: positional CPU time fields of `/proc/<pid>/stat`
//! - `user`: uid to username resolution

pub mod cmdline;
pub mod cpu;
pub mod scanner;
pub mod status;
pub mod user;

// Re-export commonly used types
pub use cpu::{lifetime_cpu_percent, ProcessCpuTimes, CLK_TCK};
pub use scanner::{list_pids, pid_exists};
