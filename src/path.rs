//! Mapping between a target file and its lock record.
//!
//! The lock record for `dir/name` is the sibling entry `dir/.#name`. The
//! directory component is never touched, so a record always lives next to
//! the file it protects.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Marker inserted before the final path segment.
pub const LOCK_PREFIX: &str = ".#";

/// Lock record path for `target`.
///
/// Returns `None` when `target` has no final segment (`/`, `..`).
pub fn lock_path_for(target: &Path) -> Option<PathBuf> {
    let name = target.file_name()?;
    let mut lock_name = OsString::from(LOCK_PREFIX);
    lock_name.push(name);
    Some(target.with_file_name(lock_name))
}

/// Target path protected by the lock record at `lock_path`.
pub fn target_path_for(lock_path: &Path) -> Option<PathBuf> {
    let name = lock_path.file_name()?.to_str()?;
    let target_name = name.strip_prefix(LOCK_PREFIX)?;
    if target_name.is_empty() {
        return None;
    }
    Some(lock_path.with_file_name(target_name))
}
