//! RAII lock guard implementation.

use super::manager::LockManager;
use super::types::{ConflictResolver, LockDecision};
use crate::boot::BootTimeOracle;
use crate::error::Result;
use crate::host::Host;
use std::path::{Path, PathBuf};
use tracing::warn;

/// RAII guard for a lock held through a [`LockManager`].
///
/// When dropped, the lock is released if this process still owns it.
/// If releasing fails, a warning is logged but no panic occurs.
#[derive(Debug)]
pub struct LockGuard<'a, H: Host, B: BootTimeOracle> {
    manager: &'a mut LockManager<H, B>,
    target: PathBuf,
    decision: LockDecision,
    released: bool,
}

impl<'a, H: Host, B: BootTimeOracle> LockGuard<'a, H, B> {
    pub(super) fn new(
        manager: &'a mut LockManager<H, B>,
        target: PathBuf,
        decision: LockDecision,
    ) -> Self {
        Self {
            manager,
            target,
            decision,
            released: false,
        }
    }

    /// The locked target path.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// How the lock was obtained.
    pub fn decision(&self) -> &LockDecision {
        &self.decision
    }

    /// Manually release the lock, handling errors explicitly.
    ///
    /// Returns `true` if a lock record was removed.
    pub fn release(mut self) -> Result<bool> {
        self.released = true;
        self.manager.release(&self.target)
    }
}

impl<H: Host, B: BootTimeOracle> Drop for LockGuard<'_, H, B> {
    fn drop(&mut self) {
        if !self.released
            && let Err(e) = self.manager.release(&self.target)
        {
            warn!(
                target = %self.target.display(),
                error = %e,
                "failed to release lock"
            );
        }
    }
}

impl<H: Host, B: BootTimeOracle> LockManager<H, B> {
    /// Lock `target` through [`LockManager::lock_file`] and tie the lock to
    /// a guard.
    ///
    /// Returns `None` when the resolver abandoned the attempt; the holder
    /// was passed to the resolver.
    pub fn guard<R>(
        &mut self,
        target: &Path,
        resolver: &mut R,
    ) -> Result<Option<LockGuard<'_, H, B>>>
    where
        R: ConflictResolver + ?Sized,
    {
        let decision = self.lock_file(target, resolver)?;
        if !decision.is_held() {
            return Ok(None);
        }
        Ok(Some(LockGuard::new(self, target.to_path_buf(), decision)))
    }
}
