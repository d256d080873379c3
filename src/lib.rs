//! procinfo-reader library
//!
//! Typed readers for the Linux process-information root (`/proc`). Raw kernel
//! text records are turned into comparable values: per-process command line,
//! virtual memory, owner, CPU usage and thread counts, and system-wide uptime,
//! kernel/OS identification, core count, process counters, memory usage and
//! CPU usage over an interval.
//!
//! Every read goes to the files afresh; nothing is cached between calls.
//! Missing files and unexpected layouts come back as [`ProcError`] values
//! rather than default numbers.
//!
//! # Usage
//!
//! ```rust,no_run
//! use procinfo_reader::{cpu_percent_between, ProcessInfoReader};
//! use std::time::Duration;
//!
//! let reader = ProcessInfoReader::default();
//!
//! for pid in reader.list_pids()? {
//!     if let Ok(p) = reader.process_snapshot(pid) {
//!         println!("{} {} {:?}", p.pid, p.command, p.cpu_percent);
//!     }
//! }
//!
//! let before = reader.cpu_snapshot(None)?;
//! std::thread::sleep(Duration::from_secs(1));
//! let after = reader.cpu_snapshot(None)?;
//! println!("cpu: {:?}%", cpu_percent_between(&before, &after));
//! # Ok::<(), procinfo_reader::ProcError>(())
//! ```

pub mod error;
pub mod fields;
pub mod format;
pub mod paths;
pub mod process;
pub mod reader;
pub mod source;
pub mod system;

/// Process identifier as named by the root's numeric directory entries.
pub type Pid = u32;

// Re-export main types for convenience
pub use error::{ProcError, Result};
pub use paths::ProcPaths;
pub use process::ProcessCpuTimes;
pub use reader::{ProcessInfoReader, ProcessSnapshot, SystemSnapshot};
pub use system::{
    cpu_percent_between, CpuField, CpuSampler, CpuSnapshot, KernelVersion, MemoryFormula,
    MemoryInfo,
};
