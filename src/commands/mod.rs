//! Command implementations for clashlock.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod run;
mod status;

#[cfg(test)]
mod tests;

use crate::cli::{Command, GlobalArgs, LockPathArgs};
use crate::config::{BootTimeSource, Config};
use crate::error::{ClashError, Result};
use crate::exit_codes;
use crate::host::SystemHost;
use crate::locks::LockManager;
use crate::path::{lock_path_for, target_path_for};
use std::path::{Path, PathBuf};

/// Dispatch a command to its implementation.
///
/// Returns the process exit code on success.
pub fn dispatch(command: Command, global: &GlobalArgs) -> Result<i32> {
    let config = match &global.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match command {
        Command::Status(args) => status::cmd_status(args, &config),
        Command::Run(args) => run::cmd_run(args, &config),
        Command::LockPath(args) => cmd_lock_path(args),
    }
}

/// Lock manager for the real host, honoring config overrides.
fn build_manager(config: &Config) -> LockManager<SystemHost, BootTimeSource> {
    LockManager::new(SystemHost::from_config(config), config.boot_time)
}

/// Refuse a path that names a lock record instead of a file to lock.
fn reject_lock_record(path: &Path) -> Result<()> {
    match target_path_for(path) {
        Some(target) => Err(ClashError::UserError(format!(
            "'{}' is a lock record; use the file it protects, '{}'",
            path.display(),
            target.display()
        ))),
        None => Ok(()),
    }
}

/// Absolute form of a user-supplied path, without resolving symlinks.
fn absolute_target(path: &Path) -> Result<PathBuf> {
    reject_lock_record(path)?;
    std::path::absolute(path).map_err(|e| {
        ClashError::UserError(format!("invalid path '{}': {}", path.display(), e))
    })
}

fn cmd_lock_path(args: LockPathArgs) -> Result<i32> {
    for path in &args.paths {
        reject_lock_record(path)?;
        let lock_path = lock_path_for(path).ok_or_else(|| {
            ClashError::UserError(format!("'{}' has no file name", path.display()))
        })?;
        println!("{}", lock_path.display());
    }
    Ok(exit_codes::SUCCESS)
}
