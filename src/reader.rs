//! `ProcessInfoReader`: the query surface consumed by a monitor front end.
//!
//! Each method reads the files it needs afresh and returns typed values. The
//! reader holds only immutable settings (paths and clock ticks), so it can be
//! cloned freely and shared across threads. Pairing CPU snapshots for a
//! usage delta stays with the caller (see [`CpuSampler`](crate::CpuSampler)).

use crate::error::{ProcError, Result};
use crate::paths::ProcPaths;
use crate::process::{cmdline, cpu, scanner, status, user, ProcessCpuTimes, CLK_TCK};
use crate::source::read_proc_file;
use crate::system::{self, memory, CpuSnapshot, KernelVersion, MemoryFormula, MemoryInfo};
use crate::Pid;
use serde::Serialize;
use tracing::debug;

/// Everything the monitor shows for one process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessSnapshot {
    pub pid: Pid,
    pub command: String,
    /// `None` for kernel threads, which have no address space.
    pub virtual_memory_mb: Option<f64>,
    /// `None` when no account record matches the uid.
    pub user: Option<String>,
    pub uid: u32,
    pub up_time_ticks: u64,
    /// `None` when the process runtime is not yet positive.
    pub cpu_percent: Option<f64>,
    pub threads: u64,
}

/// System-wide view for one refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemSnapshot {
    pub uptime_seconds: f64,
    pub kernel_version: KernelVersion,
    pub os_name: String,
    pub cores: usize,
    pub total_processes: u64,
    pub running_processes: u64,
    pub total_threads: u64,
    pub memory: MemoryInfo,
    pub ram_used_percent: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ProcessInfoReader {
    paths: ProcPaths,
    clk_tck: f64,
    memory_formula: MemoryFormula,
}

impl Default for ProcessInfoReader {
    fn default() -> Self {
        Self::new(ProcPaths::default())
    }
}

impl ProcessInfoReader {
    pub fn new(paths: ProcPaths) -> Self {
        Self {
            paths,
            clk_tck: *CLK_TCK,
            memory_formula: MemoryFormula::default(),
        }
    }

    /// Overrides the clock tick rate, for readers pointed at a captured tree
    /// from another host.
    pub fn with_clock_ticks(mut self, clk_tck: f64) -> Self {
        if clk_tck > 0.0 {
            self.clk_tck = clk_tck;
        }
        self
    }

    pub fn with_memory_formula(mut self, formula: MemoryFormula) -> Self {
        self.memory_formula = formula;
        self
    }

    pub fn paths(&self) -> &ProcPaths {
        &self.paths
    }

    pub fn clock_ticks(&self) -> f64 {
        self.clk_tck
    }

    // ---------------------------------------------------------------------
    // Enumeration
    // ---------------------------------------------------------------------

    pub fn list_pids(&self) -> Result<Vec<Pid>> {
        scanner::list_pids(&self.paths)
    }

    pub fn pid_exists(&self, pid: Pid) -> Result<bool> {
        scanner::pid_exists(&self.paths, pid)
    }

    // ---------------------------------------------------------------------
    // Per-process fields
    // ---------------------------------------------------------------------

    pub fn command(&self, pid: Pid) -> Result<String> {
        cmdline::read_command(&self.paths, pid)
    }

    pub fn virtual_memory_mb(&self, pid: Pid) -> Result<f64> {
        status::read_virtual_memory_mb(&self.paths, pid)
    }

    pub fn uid(&self, pid: Pid) -> Result<u32> {
        status::read_real_uid(&self.paths, pid)
    }

    /// Username owning the process. `Ok(None)` when the uid has no account
    /// record.
    pub fn owning_user(&self, pid: Pid) -> Result<Option<String>> {
        let uid = self.uid(pid)?;
        user::read_username(self.paths.passwd(), uid)
    }

    pub fn cpu_times(&self, pid: Pid) -> Result<ProcessCpuTimes> {
        cpu::read_cpu_times(&self.paths, pid)
    }

    /// Field 14 of the stat file, in clock ticks.
    pub fn process_up_time(&self, pid: Pid) -> Result<u64> {
        cpu::read_up_time_ticks(&self.paths, pid)
    }

    /// Seconds since the process started, never negative.
    pub fn process_age_seconds(&self, pid: Pid) -> Result<f64> {
        let times = self.cpu_times(pid)?;
        let uptime = self.system_uptime()?;
        Ok(cpu::runtime_seconds(&times, uptime, self.clk_tck).max(0.0))
    }

    /// Lifetime CPU usage of a process, `None` when indeterminate.
    pub fn cpu_percent(&self, pid: Pid) -> Result<Option<f64>> {
        let times = self.cpu_times(pid)?;
        let uptime = self.system_uptime()?;
        Ok(cpu::lifetime_cpu_percent(&times, uptime, self.clk_tck))
    }

    pub fn thread_count(&self, pid: Pid) -> Result<u64> {
        status::read_thread_count(&self.paths, pid)
    }

    /// Collects every per-process field for `pid`.
    ///
    /// An unreadable account database is an error, not an unknown user.
    pub fn process_snapshot(&self, pid: Pid) -> Result<ProcessSnapshot> {
        let uptime = self.system_uptime()?;
        let accounts = read_proc_file(self.paths.passwd())?;
        self.process_snapshot_at(pid, uptime, &accounts)
    }

    fn process_snapshot_at(
        &self,
        pid: Pid,
        system_uptime: f64,
        accounts: &str,
    ) -> Result<ProcessSnapshot> {
        let command = self.command(pid)?;

        let status_path = self.paths.status(pid);
        let status_content = read_proc_file(&status_path)?;
        let virtual_memory_mb = match status::parse_vm_size_kb(&status_path, &status_content) {
            Ok(kb) => Some(kb as f64 / status::KB_PER_MB),
            Err(ProcError::FieldNotFound { .. }) => None,
            Err(e) => return Err(e),
        };
        let uid = status::parse_real_uid(&status_path, &status_content)?;
        let threads = status::parse_threads(&status_path, &status_content)?;
        let user = user::lookup_username(accounts, uid);

        let stat_path = self.paths.process_stat(pid);
        let stat_content = read_proc_file(&stat_path)?;
        let times = cpu::parse_cpu_times(&stat_path, &stat_content)?;

        Ok(ProcessSnapshot {
            pid,
            command,
            virtual_memory_mb,
            user,
            uid,
            up_time_ticks: times.utime,
            cpu_percent: cpu::lifetime_cpu_percent(&times, system_uptime, self.clk_tck),
            threads,
        })
    }

    /// Snapshots every enumerated process, up to `max` of them.
    ///
    /// Processes that exit or cannot be read mid-scan are skipped. The account
    /// database is read once per call; failing to read it fails the call.
    pub fn process_snapshots(&self, max: Option<usize>) -> Result<Vec<ProcessSnapshot>> {
        let uptime = self.system_uptime()?;
        let accounts = read_proc_file(self.paths.passwd())?;
        let mut out = Vec::new();
        for pid in self.list_pids()? {
            if max.is_some_and(|m| out.len() >= m) {
                break;
            }
            match self.process_snapshot_at(pid, uptime, &accounts) {
                Ok(snapshot) => out.push(snapshot),
                Err(e) => debug!("Skipping pid {}: {}", pid, e),
            }
        }
        Ok(out)
    }

    // ---------------------------------------------------------------------
    // System-wide fields
    // ---------------------------------------------------------------------

    pub fn system_uptime(&self) -> Result<f64> {
        system::read_uptime(&self.paths)
    }

    pub fn kernel_version(&self) -> Result<KernelVersion> {
        system::read_kernel_version(&self.paths)
    }

    pub fn os_name(&self) -> Result<String> {
        system::read_os_name(&self.paths)
    }

    pub fn core_count(&self) -> Result<usize> {
        system::read_core_count(&self.paths)
    }

    pub fn total_processes(&self) -> Result<u64> {
        system::read_total_processes(&self.paths)
    }

    pub fn running_processes(&self) -> Result<u64> {
        system::read_running_processes(&self.paths)
    }

    /// Sum of `Threads:` over a fresh enumeration, skipping processes that
    /// vanish or cannot be read.
    pub fn total_threads(&self) -> Result<u64> {
        let mut total: u64 = 0;
        for pid in self.list_pids()? {
            match self.thread_count(pid) {
                Ok(n) => total = total.saturating_add(n),
                Err(e) => debug!("Skipping thread count of pid {}: {}", pid, e),
            }
        }
        Ok(total)
    }

    pub fn memory_info(&self) -> Result<MemoryInfo> {
        memory::read_memory_info(&self.paths)
    }

    /// Share of RAM in use with the configured formula.
    pub fn ram_used_percent(&self) -> Result<Option<f64>> {
        Ok(self.memory_info()?.used_percent(self.memory_formula))
    }

    /// Counters of the aggregate line (`None`) or of a single core.
    pub fn cpu_snapshot(&self, core: Option<usize>) -> Result<CpuSnapshot> {
        system::cpu::read_cpu_snapshot(&self.paths, core)
    }

    pub fn cpu_snapshots(&self) -> Result<Vec<CpuSnapshot>> {
        system::cpu::read_cpu_snapshots(&self.paths)
    }

    pub fn system_snapshot(&self) -> Result<SystemSnapshot> {
        let memory = self.memory_info()?;
        Ok(SystemSnapshot {
            uptime_seconds: self.system_uptime()?,
            kernel_version: self.kernel_version()?,
            os_name: self.os_name()?,
            cores: self.core_count()?,
            total_processes: self.total_processes()?,
            running_processes: self.running_processes()?,
            total_threads: self.total_threads()?,
            ram_used_percent: memory.used_percent(self.memory_formula),
            memory,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_clock_ticks_rejects_non_positive() {
        let reader = ProcessInfoReader::default().with_clock_ticks(250.0);
        assert_eq!(reader.clock_ticks(), 250.0);
        let reader = reader.with_clock_ticks(0.0);
        assert_eq!(reader.clock_ticks(), 250.0);
    }

    #[test]
    fn test_reader_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<ProcessInfoReader>();
    }
}
