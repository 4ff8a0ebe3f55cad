//! Lock record primitives.
//!
//! A lock record is created with a single create-if-absent operation and
//! read back with a single whole-content read:
//!
//! - **Unix**: a symbolic link whose target is the token string.
//!   `symlink(2)` fails with `EEXIST` if the entry exists and `readlink(2)`
//!   returns the full content in one call.
//! - **Other platforms**: a regular file opened with `create_new`.
//!
//! Nothing here checks for existence before creating.

use super::types::CreateOutcome;
use crate::error::{ClashError, Result};
use crate::token::LockToken;
use std::fs;
use std::io;
use std::path::Path;

/// Atomically create the lock record at `lock_path` holding `token`.
///
/// # Returns
///
/// * `Ok(CreateOutcome::Created)` - The record now holds `token`
/// * `Ok(CreateOutcome::AlreadyExists)` - A record exists and was not touched
/// * `Err(ClashError::System)` - Any other filesystem failure
pub fn try_create(lock_path: &Path, token: &LockToken) -> Result<CreateOutcome> {
    match create_record(lock_path, &token.to_string()) {
        Ok(()) => Ok(CreateOutcome::Created),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(CreateOutcome::AlreadyExists),
        Err(e) => Err(ClashError::system("create lock record", lock_path, e)),
    }
}

/// Replace whatever lock record exists at `lock_path` with `token`.
///
/// Removal and creation are two steps; if another process recreates the
/// record in between, this fails instead of overwriting it.
pub fn force_create(lock_path: &Path, token: &LockToken) -> Result<()> {
    remove_record(lock_path)?;
    match try_create(lock_path, token)? {
        CreateOutcome::Created => Ok(()),
        CreateOutcome::AlreadyExists => Err(ClashError::system(
            "create lock record",
            lock_path,
            io::Error::new(
                io::ErrorKind::AlreadyExists,
                "lock record was recreated by another process during takeover",
            ),
        )),
    }
}

/// Read the entire content of the lock record, `None` if there is none.
pub fn read_record(lock_path: &Path) -> Result<Option<String>> {
    match read_content(lock_path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ClashError::system("read lock record", lock_path, e)),
    }
}

/// Remove the lock record. A record that is already gone counts as removed.
pub fn remove_record(lock_path: &Path) -> Result<()> {
    match fs::remove_file(lock_path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ClashError::system("remove lock record", lock_path, e)),
    }
}

#[cfg(unix)]
fn create_record(lock_path: &Path, content: &str) -> io::Result<()> {
    std::os::unix::fs::symlink(content, lock_path)
}

#[cfg(unix)]
fn read_content(lock_path: &Path) -> io::Result<String> {
    fs::read_link(lock_path).map(|target| target.to_string_lossy().into_owned())
}

#[cfg(not(unix))]
fn create_record(lock_path: &Path, content: &str) -> io::Result<()> {
    use std::io::Write;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(lock_path)?;

    let written = file
        .write_all(content.as_bytes())
        .and_then(|()| file.sync_all());
    if let Err(e) = written {
        // Clean up the record on write failure
        let _ = fs::remove_file(lock_path);
        return Err(e);
    }
    Ok(())
}

#[cfg(not(unix))]
fn read_content(lock_path: &Path) -> io::Result<String> {
    fs::read_to_string(lock_path)
}
