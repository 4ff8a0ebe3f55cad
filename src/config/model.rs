//! Config struct definition and default implementation.

use super::types::BootTimeSource;
use serde::{Deserialize, Serialize};

/// Configuration for clashlock.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lock owner name written into tokens (default: `$USER`/`$USERNAME`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    /// Host name written into and compared against tokens
    /// (default: the system host name).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,

    /// Boot time source for pid-reuse detection.
    pub boot_time: BootTimeSource,
}
