//! Cumulative CPU counters from /proc/stat and the two-sample usage delta.
//!
//! A single snapshot only gives the average since boot. The instantaneous
//! usage is derived from two snapshots of the same `cpu` line taken some
//! interval apart.

use crate::error::{ProcError, Result};
use crate::fields::parse_token;
use crate::paths::ProcPaths;
use crate::source::read_proc_file;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Number of counters carried by a `cpu` line on current kernels.
pub const CPU_FIELD_COUNT: usize = 10;

/// Minimum counters a line must carry (user, nice, system, idle).
const MIN_CPU_FIELDS: usize = 4;

/// Position of each counter on a `cpu` line, after the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CpuField {
    User = 0,
    Nice = 1,
    System = 2,
    Idle = 3,
    Iowait = 4,
    Irq = 5,
    Softirq = 6,
    Steal = 7,
    Guest = 8,
    GuestNice = 9,
}

impl CpuField {
    pub const ALL: [CpuField; CPU_FIELD_COUNT] = [
        CpuField::User,
        CpuField::Nice,
        CpuField::System,
        CpuField::Idle,
        CpuField::Iowait,
        CpuField::Irq,
        CpuField::Softirq,
        CpuField::Steal,
        CpuField::Guest,
        CpuField::GuestNice,
    ];

    /// Counters that count as busy time.
    pub const ACTIVE: [CpuField; 8] = [
        CpuField::User,
        CpuField::Nice,
        CpuField::System,
        CpuField::Irq,
        CpuField::Softirq,
        CpuField::Steal,
        CpuField::Guest,
        CpuField::GuestNice,
    ];

    /// Counters that count as non-busy time.
    pub const IDLE: [CpuField; 2] = [CpuField::Idle, CpuField::Iowait];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// One point-in-time read of a `cpu` or `cpuN` line, in clock ticks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CpuSnapshot {
    /// `cpu` for the aggregate line, `cpu0`, `cpu1`, ... for single cores.
    pub label: String,
    pub values: [u64; CPU_FIELD_COUNT],
}

impl CpuSnapshot {
    pub fn get(&self, field: CpuField) -> u64 {
        self.values[field.index()]
    }

    /// Sum of the busy counters, saturating at `u64::MAX`.
    pub fn active(&self) -> u64 {
        self.sum_of(&CpuField::ACTIVE)
    }

    /// Sum of the idle and iowait counters, saturating at `u64::MAX`.
    pub fn idle(&self) -> u64 {
        self.sum_of(&CpuField::IDLE)
    }

    fn sum_of(&self, fields: &[CpuField]) -> u64 {
        fields
            .iter()
            .map(|f| self.get(*f))
            .fold(0u64, u64::saturating_add)
    }

    /// Counters rendered back as text tokens, in [`CpuField`] order.
    pub fn tokens(&self) -> Vec<String> {
        self.values.iter().map(u64::to_string).collect()
    }
}

/// Label of the line selected by `core`: `cpu` for the aggregate, `cpuN`
/// otherwise.
pub fn cpu_label(core: Option<usize>) -> String {
    match core {
        Some(n) => format!("cpu{}", n),
        None => "cpu".to_string(),
    }
}

/// Parses one `cpu` line. Counters missing at the end (older kernels without
/// steal/guest) are zero; extra counters are ignored.
pub fn parse_cpu_line(path: &Path, line: &str) -> Result<CpuSnapshot> {
    let mut tokens = line.split_whitespace();
    let label = tokens
        .next()
        .ok_or_else(|| ProcError::field_not_found(path, "cpu"))?
        .to_string();

    let mut values = [0u64; CPU_FIELD_COUNT];
    let mut count = 0;
    for (slot, token) in values.iter_mut().zip(tokens) {
        *slot = parse_token(path, &label, token)?;
        count += 1;
    }
    if count < MIN_CPU_FIELDS {
        return Err(ProcError::CpuLine {
            path: path.to_path_buf(),
            label,
        });
    }

    Ok(CpuSnapshot { label, values })
}

/// Selects the line whose label equals `cpu_label(core)` exactly, so `cpu1`
/// never matches `cpu10`.
pub fn parse_cpu_snapshot(path: &Path, content: &str, core: Option<usize>) -> Result<CpuSnapshot> {
    let label = cpu_label(core);
    let line = content
        .lines()
        .find(|line| line.split_whitespace().next() == Some(label.as_str()))
        .ok_or_else(|| ProcError::field_not_found(path, label.as_str()))?;
    parse_cpu_line(path, line)
}

/// Parses every `cpu*` line in file order.
pub fn parse_cpu_snapshots(path: &Path, content: &str) -> Result<Vec<CpuSnapshot>> {
    let snapshots = content
        .lines()
        .filter(|line| line.starts_with("cpu"))
        .map(|line| parse_cpu_line(path, line))
        .collect::<Result<Vec<_>>>()?;
    if snapshots.is_empty() {
        return Err(ProcError::field_not_found(path, "cpu"));
    }
    Ok(snapshots)
}

pub fn read_cpu_snapshot(paths: &ProcPaths, core: Option<usize>) -> Result<CpuSnapshot> {
    let path = paths.stat();
    let content = read_proc_file(&path)?;
    parse_cpu_snapshot(&path, &content, core)
}

pub fn read_cpu_snapshots(paths: &ProcPaths) -> Result<Vec<CpuSnapshot>> {
    let path = paths.stat();
    let content = read_proc_file(&path)?;
    parse_cpu_snapshots(&path, &content)
}

/// CPU usage between two snapshots of the same line, in percent.
///
/// Returns `None` when the snapshots come from different lines or when no
/// tick elapsed between them. Counters that went backwards contribute zero.
pub fn cpu_percent_between(earlier: &CpuSnapshot, later: &CpuSnapshot) -> Option<f64> {
    if earlier.label != later.label {
        return None;
    }
    let active_delta = later.active().saturating_sub(earlier.active());
    let idle_delta = later.idle().saturating_sub(earlier.idle());
    let total = active_delta.saturating_add(idle_delta);
    if total == 0 {
        return None;
    }
    Some(100.0 * active_delta as f64 / total as f64)
}

/// Keeps the previous sample of every `cpu` line so that successive calls to
/// [`CpuSampler::sample`] yield usage over the elapsed interval.
#[derive(Debug, Default)]
pub struct CpuSampler {
    previous: HashMap<String, CpuSnapshot>,
}

impl CpuSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a new set of snapshots and returns usage per label.
    ///
    /// Labels seen for the first time have no usage yet.
    pub fn update(&mut self, current: Vec<CpuSnapshot>) -> HashMap<String, f64> {
        let mut usage = HashMap::new();
        for snapshot in current {
            if let Some(previous) = self.previous.get(&snapshot.label) {
                match cpu_percent_between(previous, &snapshot) {
                    Some(pct) => {
                        usage.insert(snapshot.label.clone(), pct);
                    }
                    None => debug!("No ticks elapsed for {}", snapshot.label),
                }
            }
            self.previous.insert(snapshot.label.clone(), snapshot);
        }
        usage
    }

    /// Reads /proc/stat and feeds it to [`CpuSampler::update`].
    pub fn sample(&mut self, paths: &ProcPaths) -> Result<HashMap<String, f64>> {
        let current = read_cpu_snapshots(paths)?;
        Ok(self.update(current))
    }
}
