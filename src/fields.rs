//! Field extraction helpers shared by the per-file parsers.
//!
//! /proc files come in two shapes: labeled lines (`VmSize:   1234 kB`) and
//! positional whitespace-separated records. These helpers locate a field in
//! either shape and turn a missing or unparsable value into a [`ProcError`].

use crate::error::{ProcError, Result};
use std::path::Path;
use std::str::FromStr;

/// Returns the remainder of the first line starting with `label`.
pub fn labeled_line<'a>(content: &'a str, label: &str) -> Option<&'a str> {
    content.lines().find_map(|line| line.strip_prefix(label))
}

/// Parses the first whitespace-separated token of a value, ignoring any
/// trailing unit such as `kB`.
pub fn parse_kb_value(v: &str) -> Option<u64> {
    v.split_whitespace().next()?.parse().ok()
}

/// Parses a token, reporting the file and field on failure.
pub fn parse_token<T: FromStr>(path: &Path, field: &str, token: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| ProcError::parse(path, field, token))
}

/// Reads the first value token of a labeled line, e.g. `Threads:\t4`.
pub fn labeled_value<T: FromStr>(path: &Path, content: &str, label: &str) -> Result<T> {
    let rest =
        labeled_line(content, label).ok_or_else(|| ProcError::field_not_found(path, label))?;
    let token = rest
        .split_whitespace()
        .next()
        .ok_or_else(|| ProcError::field_not_found(path, label))?;
    parse_token(path, label, token)
}

/// Reads a KB figure from a labeled line such as `MemFree:  500000 kB`.
pub fn labeled_kb(path: &Path, content: &str, label: &str) -> Result<u64> {
    let rest =
        labeled_line(content, label).ok_or_else(|| ProcError::field_not_found(path, label))?;
    parse_kb_value(rest).ok_or_else(|| ProcError::parse(path, label, rest.trim()))
}

/// Reads the value of a line whose first token is exactly `key`, as in the
/// `processes 8123` and `procs_running 3` lines of /proc/stat.
pub fn keyed_value<T: FromStr>(path: &Path, content: &str, key: &str) -> Result<T> {
    for line in content.lines() {
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some(key) {
            continue;
        }
        return match tokens.next() {
            Some(token) => parse_token(path, key, token),
            None => Err(ProcError::field_not_found(path, key)),
        };
    }
    Err(ProcError::field_not_found(path, key))
}

/// Returns the 1-based `position`th whitespace-separated token of `line`.
pub fn positional<'a>(path: &Path, line: &'a str, position: usize) -> Result<&'a str> {
    position
        .checked_sub(1)
        .and_then(|idx| line.split_whitespace().nth(idx))
        .ok_or_else(|| ProcError::field_not_found(path, format!("field {}", position)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS: &str = "Name:\tbash\nUmask:\t0022\nState:\tS (sleeping)\n\
                          Uid:\t1000\t1000\t1000\t1000\nVmSize:\t  204800 kB\nThreads:\t4\n";

    // -------------------------------------------------------------------------
    // Tests for parse_kb_value
    // -------------------------------------------------------------------------

    #[test]
    fn test_parse_kb_value() {
        assert_eq!(parse_kb_value("       1234 kB"), Some(1234));
        assert_eq!(parse_kb_value("0 kB"), Some(0));
        assert_eq!(parse_kb_value("  42  "), Some(42));
        assert_eq!(parse_kb_value("18446744073709551615"), Some(u64::MAX));
    }

    #[test]
    fn test_parse_kb_value_invalid() {
        assert_eq!(parse_kb_value(""), None);
        assert_eq!(parse_kb_value("kB"), None);
        assert_eq!(parse_kb_value("-1 kB"), None);
        assert_eq!(parse_kb_value("1.5 kB"), None);
    }

    // -------------------------------------------------------------------------
    // Tests for labeled lines
    // -------------------------------------------------------------------------

    #[test]
    fn test_labeled_value() {
        let path = Path::new("/proc/1/status");
        let threads: u64 = labeled_value(path, STATUS, "Threads:").unwrap();
        assert_eq!(threads, 4);
        let uid: u32 = labeled_value(path, STATUS, "Uid:").unwrap();
        assert_eq!(uid, 1000);
        assert_eq!(labeled_kb(path, STATUS, "VmSize:").unwrap(), 204800);
    }

    #[test]
    fn test_labeled_value_missing() {
        let path = Path::new("/proc/1/status");
        let err = labeled_value::<u64>(path, STATUS, "VmRSS:").unwrap_err();
        assert!(matches!(err, ProcError::FieldNotFound { .. }));

        let err = labeled_value::<u64>(path, "Threads:\tmany\n", "Threads:").unwrap_err();
        assert!(matches!(err, ProcError::Parse { .. }));
    }

    #[test]
    fn test_keyed_value_requires_whole_token() {
        let path = Path::new("/proc/stat");
        let content = "processes_extra 9\nprocesses 8123\nprocs_running 3\n";
        assert_eq!(keyed_value::<u64>(path, content, "processes").unwrap(), 8123);
        assert_eq!(keyed_value::<u64>(path, content, "procs_running").unwrap(), 3);
        assert!(keyed_value::<u64>(path, content, "procs_blocked").is_err());
    }

    #[test]
    fn test_positional() {
        let path = Path::new("/proc/version");
        let line = "Linux version 5.4.0 #1 SMP";
        assert_eq!(positional(path, line, 1).unwrap(), "Linux");
        assert_eq!(positional(path, line, 3).unwrap(), "5.4.0");
        assert!(positional(path, line, 0).is_err());
        assert!(positional(path, line, 6).is_err());
    }
}
