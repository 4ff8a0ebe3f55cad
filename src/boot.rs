//! Boot-time oracles.
//!
//! A lock token records the boot time of the machine that wrote it. When a
//! token's pid is alive but the recorded boot time differs from the
//! current one, the pid was recycled after a reboot and the lock is stale.

use std::sync::OnceLock;

/// Supplies the local host's last boot time in Unix seconds.
pub trait BootTimeOracle {
    /// Current boot time, or `None` if it cannot be determined.
    fn current_boot_time(&self) -> Option<i64>;
}

impl<T: BootTimeOracle + ?Sized> BootTimeOracle for &T {
    fn current_boot_time(&self) -> Option<i64> {
        (**self).current_boot_time()
    }
}

/// Oracle that never knows the boot time.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBootTime;

impl BootTimeOracle for NoBootTime {
    fn current_boot_time(&self) -> Option<i64> {
        None
    }
}

/// Oracle returning a fixed boot time.
#[derive(Debug, Clone, Copy)]
pub struct FixedBootTime(pub i64);

impl BootTimeOracle for FixedBootTime {
    fn current_boot_time(&self) -> Option<i64> {
        Some(self.0)
    }
}

/// The local machine's boot time, computed once per process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBootTime;

static SYSTEM_BOOT_TIME: OnceLock<Option<i64>> = OnceLock::new();

impl BootTimeOracle for SystemBootTime {
    fn current_boot_time(&self) -> Option<i64> {
        *SYSTEM_BOOT_TIME.get_or_init(|| {
            let boot_time = detect_boot_time();
            tracing::debug!(?boot_time, "detected system boot time");
            boot_time
        })
    }
}

/// Tries to read the uptime within a single wall-clock second.
#[cfg(target_os = "linux")]
const UPTIME_ATTEMPTS: usize = 5;

#[cfg(target_os = "linux")]
fn detect_boot_time() -> Option<i64> {
    for _ in 0..UPTIME_ATTEMPTS {
        let before = chrono::Utc::now().timestamp();
        let Ok(content) = std::fs::read_to_string("/proc/uptime") else {
            break;
        };
        let after = chrono::Utc::now().timestamp();
        // A tick during the read would make `before - uptime` off by one.
        if before != after {
            continue;
        }
        if let Some(uptime) = parse_uptime(&content) {
            return Some(before - uptime as i64);
        }
        break;
    }

    std::fs::read_to_string("/proc/stat")
        .ok()
        .and_then(|content| parse_btime(&content))
}

#[cfg(not(target_os = "linux"))]
fn detect_boot_time() -> Option<i64> {
    None
}

/// Uptime seconds from the content of `/proc/uptime`.
pub fn parse_uptime(content: &str) -> Option<f64> {
    let uptime: f64 = content.split_whitespace().next()?.parse().ok()?;
    (uptime.is_finite() && uptime >= 0.0).then_some(uptime)
}

/// Boot time from the `btime` line of `/proc/stat`.
pub fn parse_btime(content: &str) -> Option<i64> {
    content
        .lines()
        .find_map(|line| line.strip_prefix("btime "))
        .and_then(|value| value.trim().parse().ok())
        .filter(|&btime: &i64| btime > 0)
}
