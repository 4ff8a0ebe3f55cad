//! The lock manager: acquire, take over, release and inspect.

use super::classify::classify;
use super::record;
use super::types::{
    AcquireOutcome, Classification, ConflictResolver, CreateOutcome, LockDecision, LockStatus,
    Resolution,
};
use crate::boot::{BootTimeOracle, SystemBootTime};
use crate::error::{ClashError, Result};
use crate::host::{Host, SystemHost};
use crate::path::lock_path_for;
use crate::token::LockToken;
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Advisory lock manager for one process.
///
/// The filesystem is the only source of truth for who holds a lock. The
/// manager additionally remembers which targets it locked during this
/// session so they can be released together with [`release_all`].
///
/// [`release_all`]: LockManager::release_all
#[derive(Debug)]
pub struct LockManager<H = SystemHost, B = SystemBootTime> {
    host: H,
    boot: B,
    held: BTreeSet<PathBuf>,
}

impl LockManager {
    /// Manager for the real host and boot time.
    pub fn system() -> Self {
        Self::new(SystemHost::new(), SystemBootTime)
    }
}

impl<H: Host, B: BootTimeOracle> LockManager<H, B> {
    pub fn new(host: H, boot: B) -> Self {
        Self {
            host,
            boot,
            held: BTreeSet::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Targets locked by this manager and not yet released.
    pub fn held(&self) -> impl Iterator<Item = &Path> {
        self.held.iter().map(PathBuf::as_path)
    }

    /// Lock record path for `target`.
    pub fn lock_path(&self, target: &Path) -> Result<PathBuf> {
        lock_path_for(target).ok_or_else(|| {
            ClashError::UserError(format!(
                "cannot lock '{}': path has no file name",
                target.display()
            ))
        })
    }

    /// A token naming the current process, host and boot time.
    pub fn fresh_token(&self) -> LockToken {
        LockToken::new(
            self.host.user_name(),
            self.host.host_name(),
            self.host.current_pid(),
            self.boot.current_boot_time(),
        )
    }

    /// Classify the lock on `target`, removing it if it is stale.
    pub fn classify(&self, target: &Path) -> Result<Classification> {
        classify(&self.lock_path(target)?, &self.host, &self.boot)
    }

    /// Try to lock `target`.
    ///
    /// A lock already held by this process counts as acquired. A stale lock
    /// is removed and creation retried once.
    ///
    /// # Returns
    ///
    /// * `Ok(AcquireOutcome::Locked)` - This process holds the lock
    /// * `Ok(AcquireOutcome::Conflict(holder))` - Another live process holds it
    /// * `Err(ClashError::InvalidRecord)` - The existing record is malformed
    /// * `Err(ClashError::System)` - A filesystem operation failed
    pub fn acquire(&mut self, target: &Path) -> Result<AcquireOutcome> {
        let lock_path = self.lock_path(target)?;
        let token = self.fresh_token();

        if record::try_create(&lock_path, &token)? == CreateOutcome::Created {
            debug!(path = %lock_path.display(), %token, "lock acquired");
            return Ok(self.mark_held(target));
        }

        match classify(&lock_path, &self.host, &self.boot)? {
            Classification::OwnedBySelf => Ok(self.mark_held(target)),
            Classification::HeldByOther(holder) => Ok(AcquireOutcome::Conflict(holder)),
            Classification::Unlocked => self.retry_create(target, &lock_path, &token),
        }
    }

    /// The single retry after a stale record was cleared.
    ///
    /// A record found here is classified once more and never cleared for
    /// another attempt.
    pub(super) fn retry_create(
        &mut self,
        target: &Path,
        lock_path: &Path,
        token: &LockToken,
    ) -> Result<AcquireOutcome> {
        if record::try_create(lock_path, token)? == CreateOutcome::Created {
            debug!(path = %lock_path.display(), %token, "lock acquired after stale cleanup");
            return Ok(self.mark_held(target));
        }

        // Someone else won the race for the freed record.
        match classify(lock_path, &self.host, &self.boot)? {
            Classification::OwnedBySelf => Ok(self.mark_held(target)),
            Classification::HeldByOther(holder) => Ok(AcquireOutcome::Conflict(holder)),
            Classification::Unlocked => Err(ClashError::system(
                "create lock record",
                lock_path,
                io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "lock record kept reappearing while stale records were cleared",
                ),
            )),
        }
    }

    /// Lock `target` unconditionally, replacing any existing record.
    pub fn force_acquire(&mut self, target: &Path) -> Result<()> {
        let lock_path = self.lock_path(target)?;
        let token = self.fresh_token();
        record::force_create(&lock_path, &token)?;
        self.held.insert(target.to_path_buf());
        Ok(())
    }

    /// Lock `target`, asking `resolver` what to do if another process
    /// holds it.
    pub fn lock_file<R>(&mut self, target: &Path, resolver: &mut R) -> Result<LockDecision>
    where
        R: ConflictResolver + ?Sized,
    {
        let holder = match self.acquire(target)? {
            AcquireOutcome::Locked => return Ok(LockDecision::Locked),
            AcquireOutcome::Conflict(holder) => holder,
        };

        match resolver.resolve(target, &holder.owner_display()) {
            Resolution::TakeOverLock => {
                info!(
                    target = %target.display(),
                    previous = %holder,
                    "taking over lock"
                );
                self.force_acquire(target)?;
                Ok(LockDecision::TookOver { previous: holder })
            }
            Resolution::AbandonAttempt => {
                debug!(target = %target.display(), holder = %holder, "lock attempt abandoned");
                Ok(LockDecision::Abandoned { holder })
            }
        }
    }

    /// Release the lock on `target` if this process holds it.
    ///
    /// Returns `true` if a record was removed. Locks held by anyone else
    /// are never touched, and releasing an unlocked path is a no-op.
    pub fn release(&mut self, target: &Path) -> Result<bool> {
        let lock_path = self.lock_path(target)?;
        let owned = classify(&lock_path, &self.host, &self.boot)? == Classification::OwnedBySelf;
        if owned {
            record::remove_record(&lock_path)?;
            debug!(path = %lock_path.display(), "lock released");
        }
        self.held.remove(target);
        Ok(owned)
    }

    /// Release every lock this manager acquired.
    ///
    /// Keeps going past failures; targets that failed stay in [`held`] and
    /// the first error is returned.
    ///
    /// [`held`]: LockManager::held
    pub fn release_all(&mut self) -> Result<()> {
        let mut first_error = None;
        for target in std::mem::take(&mut self.held) {
            if let Err(e) = self.release(&target) {
                warn!(target = %target.display(), error = %e, "failed to release lock");
                self.held.insert(target);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Lock status of `target` for display.
    ///
    /// Stale records are removed as a side effect, like every other read.
    pub fn inspect(&self, target: &Path) -> Result<LockStatus> {
        Ok(match self.classify(target)? {
            Classification::Unlocked => LockStatus::Unlocked,
            Classification::OwnedBySelf => LockStatus::LockedBySelf,
            Classification::HeldByOther(holder) => {
                LockStatus::LockedByOther(holder.user().to_string())
            }
        })
    }

    fn mark_held(&mut self, target: &Path) -> AcquireOutcome {
        self.held.insert(target.to_path_buf());
        AcquireOutcome::Locked
    }
}
