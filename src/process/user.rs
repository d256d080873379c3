//! Uid to username resolution against a passwd-format account database.

use crate::error::Result;
use crate::source::read_proc_file;
use std::path::Path;

/// Finds the username of the first record whose uid field equals `uid`.
///
/// Records are `name:password:uid:gid:gecos:home:shell`. Comments, blank lines
/// and records with fewer than three fields are skipped.
pub fn lookup_username(content: &str, uid: u32) -> Option<String> {
    let wanted = uid.to_string();
    content
        .lines()
        .filter(|line| !line.starts_with('#'))
        .find_map(|line| {
            let mut fields = line.split(':');
            let name = fields.next()?;
            let uid_field = fields.nth(1)?;
            (uid_field == wanted && !name.is_empty()).then(|| name.to_string())
        })
}

/// Reads the account database and resolves `uid`. `Ok(None)` means no record
/// matched.
pub fn read_username(passwd: &Path, uid: u32) -> Result<Option<String>> {
    let content = read_proc_file(passwd)?;
    Ok(lookup_username(&content, uid))
}
