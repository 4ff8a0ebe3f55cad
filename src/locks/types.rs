//! Outcome and decision types for the lock protocol.

use crate::token::LockToken;
use std::path::Path;

/// Result of an atomic create-if-absent attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The lock record was created with our token.
    Created,
    /// A lock record already exists; it was left untouched.
    AlreadyExists,
}

/// Who holds the lock record of a path, as seen from this process.
///
/// Malformed records and filesystem failures are reported through
/// [`crate::error::ClashError`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// No lock record exists (or a stale one was just removed).
    Unlocked,
    /// The record names the current process.
    OwnedBySelf,
    /// The record names another process that may still hold it.
    HeldByOther(LockToken),
}

/// Result of [`super::LockManager::acquire`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquireOutcome {
    /// The current process holds the lock.
    Locked,
    /// Another live process holds the lock.
    Conflict(LockToken),
}

/// Read-only lock status of a path, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockStatus {
    Unlocked,
    LockedBySelf,
    /// Locked by another process; carries the holder's user name.
    LockedByOther(String),
}

/// Answer of a [`ConflictResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Leave the other holder's lock alone and proceed without locking.
    AbandonAttempt,
    /// Replace the other holder's lock with ours.
    TakeOverLock,
}

/// Decides what to do when a path is locked by someone else.
///
/// This is the only route by which a conflicting lock gets replaced.
pub trait ConflictResolver {
    /// `owner` describes the holder, e.g. `alice@host1 (pid 4242)`.
    fn resolve(&mut self, target: &Path, owner: &str) -> Resolution;
}

impl<F> ConflictResolver for F
where
    F: FnMut(&Path, &str) -> Resolution,
{
    fn resolve(&mut self, target: &Path, owner: &str) -> Resolution {
        self(target, owner)
    }
}

/// A fixed answer.
impl ConflictResolver for Resolution {
    fn resolve(&mut self, _target: &Path, _owner: &str) -> Resolution {
        *self
    }
}

/// Result of [`super::LockManager::lock_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockDecision {
    /// The lock was free (or already ours) and is now held.
    Locked,
    /// The lock was taken over from `previous`.
    TookOver { previous: LockToken },
    /// The resolver chose not to take the lock from `holder`.
    Abandoned { holder: LockToken },
}

impl LockDecision {
    /// Whether the current process holds the lock afterwards.
    pub fn is_held(&self) -> bool {
        !matches!(self, LockDecision::Abandoned { .. })
    }
}
