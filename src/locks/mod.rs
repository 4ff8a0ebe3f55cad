//! Advisory locking of shared files.
//!
//! # Lock Records
//!
//! To lock `dir/name`, a process creates the sibling entry `dir/.#name`
//! whose entire content is a [`LockToken`](crate::token::LockToken):
//! `user@host.pid` or `user@host.pid:boottime`. The record is created with
//! a single create-if-absent operation, so at most one process can create
//! it; the existence of the record is the only lock state there is.
//!
//! # Staleness
//!
//! A record found on this host is stale if its pid is not running, or if
//! the host rebooted since the record was written. Stale records are
//! removed whenever they are read. Records from other hosts are always
//! treated as held.
//!
//! # Advisory
//!
//! Nothing stops a process from writing a locked file. A conflict is only
//! information: a [`ConflictResolver`] decides whether to take the lock
//! over or go ahead without it.

mod classify;
mod guard;
mod manager;
pub mod record;
mod types;


// Re-export public API
pub use classify::{BOOT_TIME_TOLERANCE_SECS, classify};
pub use guard::LockGuard;
pub use manager::LockManager;
pub use types::{
    AcquireOutcome, Classification, ConflictResolver, CreateOutcome, LockDecision, LockStatus,
    Resolution,
};
