//! Configuration types and defaults for clashlock.

use crate::boot::{BootTimeOracle, NoBootTime, SystemBootTime};
use serde::{Deserialize, Serialize};

/// Where lock tokens get their boot time from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BootTimeSource {
    /// Detect the local boot time (default).
    #[default]
    Auto,
    /// Never record a boot time. Same-host records that carry one can no
    /// longer be matched to the current boot and are treated as stale.
    Disabled,
}

impl BootTimeOracle for BootTimeSource {
    fn current_boot_time(&self) -> Option<i64> {
        match self {
            BootTimeSource::Auto => SystemBootTime.current_boot_time(),
            BootTimeSource::Disabled => NoBootTime.current_boot_time(),
        }
    }
}
