//! Staleness classification of an existing lock record.

use super::record;
use super::types::Classification;
use crate::boot::BootTimeOracle;
use crate::error::{ClashError, Result};
use crate::host::{Host, Liveness};
use crate::token::LockToken;
use std::path::Path;
use tracing::{debug, info};

/// Allowed skew between a token's boot time and the current one.
pub const BOOT_TIME_TOLERANCE_SECS: u64 = 1;

/// Classify the lock record at `lock_path` relative to the current process.
///
/// A record whose holder is provably gone is removed as a side effect and
/// reported as [`Classification::Unlocked`]. A holder is gone when it claims
/// this host and either its pid is not a live process or the host has been
/// rebooted since the record was written (the pid was recycled).
///
/// Two checks are loose:
///
/// - A record naming our pid is ours regardless of the host it names.
/// - A record naming another host is never probed; it is always held.
///
/// # Errors
///
/// * `ClashError::InvalidRecord` - The record content is not a token
/// * `ClashError::System` - Reading the record or removing a stale one failed
pub fn classify<H, B>(lock_path: &Path, host: &H, boot: &B) -> Result<Classification>
where
    H: Host + ?Sized,
    B: BootTimeOracle + ?Sized,
{
    let Some(content) = record::read_record(lock_path)? else {
        return Ok(Classification::Unlocked);
    };

    let token = LockToken::parse(&content).map_err(|e| {
        debug!(path = %lock_path.display(), error = %e, "malformed lock record");
        ClashError::InvalidRecord {
            path: lock_path.to_path_buf(),
            content,
        }
    })?;

    if token.pid() == host.current_pid() {
        return Ok(Classification::OwnedBySelf);
    }

    if token.host() != host.host_name() {
        return Ok(Classification::HeldByOther(token));
    }

    if holder_is_running(&token, host, boot) {
        return Ok(Classification::HeldByOther(token));
    }

    info!(path = %lock_path.display(), holder = %token, "removing stale lock record");
    record::remove_record(lock_path)?;
    Ok(Classification::Unlocked)
}

/// Whether a same-host holder is still the process that wrote the token.
fn holder_is_running<H, B>(token: &LockToken, host: &H, boot: &B) -> bool
where
    H: Host + ?Sized,
    B: BootTimeOracle + ?Sized,
{
    if token.pid() == 0 {
        return false;
    }
    if host.probe(token.pid()) == Liveness::Dead {
        debug!(pid = token.pid(), "lock holder is not running");
        return false;
    }
    let same_epoch = same_boot_epoch(token.boot_time(), boot.current_boot_time());
    if !same_epoch {
        debug!(
            pid = token.pid(),
            recorded = ?token.boot_time(),
            "lock holder pid predates the current boot"
        );
    }
    same_epoch
}

/// A token without a boot time matches any epoch. A token with one only
/// matches a known current boot time within the tolerance.
fn same_boot_epoch(recorded: Option<i64>, current: Option<i64>) -> bool {
    match (recorded, current) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(recorded), Some(current)) => recorded.abs_diff(current) <= BOOT_TIME_TOLERANCE_SECS,
    }
}
