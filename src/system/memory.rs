//! Memory figures from /proc/meminfo.

use crate::error::Result;
use crate::fields::labeled_kb;
use crate::paths::ProcPaths;
use crate::source::read_proc_file;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Selected /proc/meminfo lines, in KB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryInfo {
    pub total_kb: u64,
    pub free_kb: u64,
    pub available_kb: u64,
    pub buffers_kb: u64,
}

/// How the "used" share of RAM is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemoryFormula {
    /// `1 - free / (available - buffers)`, the monitor's historical figure.
    #[default]
    AvailableMinusBuffers,
    /// `(total - available) / total`, what `free(1)` reports as used.
    TotalMinusAvailable,
}

impl MemoryInfo {
    /// Share of RAM in use, in percent. `None` when the denominator of the
    /// selected formula is not positive.
    pub fn used_percent(&self, formula: MemoryFormula) -> Option<f64> {
        match formula {
            MemoryFormula::AvailableMinusBuffers => {
                let denominator = self.available_kb as f64 - self.buffers_kb as f64;
                if denominator <= 0.0 {
                    return None;
                }
                Some(100.0 * (1.0 - self.free_kb as f64 / denominator))
            }
            MemoryFormula::TotalMinusAvailable => {
                if self.total_kb == 0 {
                    return None;
                }
                let used = self.total_kb.saturating_sub(self.available_kb);
                Some(100.0 * used as f64 / self.total_kb as f64)
            }
        }
    }
}

pub fn parse_memory_info(path: &Path, content: &str) -> Result<MemoryInfo> {
    Ok(MemoryInfo {
        total_kb: labeled_kb(path, content, "MemTotal:")?,
        free_kb: labeled_kb(path, content, "MemFree:")?,
        available_kb: labeled_kb(path, content, "MemAvailable:")?,
        buffers_kb: labeled_kb(path, content, "Buffers:")?,
    })
}

pub fn read_memory_info(paths: &ProcPaths) -> Result<MemoryInfo> {
    let path = paths.meminfo();
    let content = read_proc_file(&path)?;
    parse_memory_info(&path, &content)
}
