//! Raw file acquisition.

use crate::error::{ProcError, Result};
use std::fs;
use std::path::Path;

/// Reads a whole /proc (or account database) file as text.
///
/// Files under /proc are small and regenerated on every open, so reading them
/// in one go releases the handle before any parsing starts.
pub fn read_proc_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ProcError::Unavailable {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_proc_file_missing() {
        let dir = tempdir().expect("Failed to create temp dir");
        let err = read_proc_file(&dir.path().join("uptime")).unwrap_err();
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_read_proc_file_contents() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("uptime");
        std::fs::write(&path, "350735.47 234388.90\n").expect("Failed to write uptime");
        assert_eq!(read_proc_file(&path).unwrap(), "350735.47 234388.90\n");
    }
}
