//! Command line of a process.

use crate::error::Result;
use crate::paths::ProcPaths;
use crate::source::read_proc_file;
use crate::Pid;

/// Turns the raw cmdline record into a printable line.
///
/// Arguments are NUL-separated and the record ends with a NUL. Only the first
/// line is kept. Kernel threads have an empty cmdline.
pub fn format_cmdline(raw: &str) -> String {
    let line = raw.lines().next().unwrap_or("");
    line.trim_end_matches('\0').replace('\0', " ")
}

pub fn read_command(paths: &ProcPaths, pid: Pid) -> Result<String> {
    let raw = read_proc_file(&paths.cmdline(pid))?;
    Ok(format_cmdline(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cmdline() {
        assert_eq!(
            format_cmdline("/usr/sbin/sshd\0-D\0-o\0UsePAM=yes\0"),
            "/usr/sbin/sshd -D -o UsePAM=yes"
        );
        assert_eq!(format_cmdline("nginx: worker process"), "nginx: worker process");
        assert_eq!(format_cmdline(""), "");
    }
}
