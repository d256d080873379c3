//! Process discovery in the process-information root.
//!
//! Existence is always answered from a fresh directory listing. Processes come
//! and go between any two reads, so nothing here is cached.

use crate::error::{ProcError, Result};
use crate::paths::ProcPaths;
use crate::Pid;
use std::fs;
use tracing::trace;

/// Lists every entry of the root whose name is purely decimal digits, in
/// directory order.
pub fn list_pids(paths: &ProcPaths) -> Result<Vec<Pid>> {
    let root = paths.root();
    let entries = fs::read_dir(root).map_err(|source| ProcError::Unavailable {
        path: root.to_path_buf(),
        source,
    })?;

    let mut out = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ProcError::Enumeration {
            path: root.to_path_buf(),
            source,
        })?;
        let file_name = entry.file_name();
        let name = match file_name.to_str() {
            Some(v) => v,
            None => continue,
        };
        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        match name.parse::<Pid>() {
            Ok(pid) => out.push(pid),
            Err(_) => trace!("Skipping out-of-range pid entry {}", name),
        }
    }
    Ok(out)
}

/// True iff `pid` shows up in a fresh listing of the root.
pub fn pid_exists(paths: &ProcPaths, pid: Pid) -> Result<bool> {
    Ok(list_pids(paths)?.contains(&pid))
}
