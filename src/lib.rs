//! clashlock: advisory, crash-tolerant locking of shared files.
//!
//! Two editing sessions, on one machine or on several machines sharing a
//! filesystem, use lock records to notice that they are about to modify
//! the same file. Locks are advisory and carry no server: a lock is a
//! sibling entry `.#name` created atomically, holding `user@host.pid` and
//! optionally the host's boot time.
//!
//! ```no_run
//! use clashlock::locks::{LockDecision, LockManager, Resolution};
//! use std::path::Path;
//!
//! let mut manager = LockManager::system();
//! let decision = manager.lock_file(Path::new("notes.txt"), &mut Resolution::AbandonAttempt)?;
//! if let LockDecision::Abandoned { holder } = decision {
//!     eprintln!("notes.txt is being edited by {}", holder.owner_display());
//! }
//! manager.release_all()?;
//! # Ok::<(), clashlock::error::ClashError>(())
//! ```

pub mod boot;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod host;
pub mod locks;
pub mod path;
pub mod token;

#[cfg(test)]
mod test_support;
