//! Host and process primitives used by the lock protocol.
//!
//! Everything the staleness check needs to know about "here and now" goes
//! through the [`Host`] trait: who we are, which machine we are on, our pid,
//! and whether some other pid on this machine is alive.

use crate::config::Config;

/// Result of probing a process id on the local host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// Some process currently uses this pid.
    Alive,
    /// No process uses this pid.
    Dead,
}

/// Identity and process primitives of the local host.
pub trait Host {
    /// Identity of the locking principal.
    fn user_name(&self) -> String;

    /// Name of the local machine, compared verbatim against lock tokens.
    fn host_name(&self) -> String;

    /// Id of the current process.
    fn current_pid(&self) -> u32;

    /// Zero-effect liveness probe for `pid` on the local host.
    fn probe(&self, pid: u32) -> Liveness;
}

/// The real host, with optional identity overrides from config.
#[derive(Debug, Clone, Default)]
pub struct SystemHost {
    user_name: Option<String>,
    host_name: Option<String>,
}

impl SystemHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host using the identity overrides in `config`, if any.
    pub fn from_config(config: &Config) -> Self {
        Self {
            user_name: config.user_name.clone(),
            host_name: config.host_name.clone(),
        }
    }
}

impl Host for SystemHost {
    fn user_name(&self) -> String {
        if let Some(user) = &self.user_name {
            return user.clone();
        }
        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_default()
    }

    fn host_name(&self) -> String {
        if let Some(host) = &self.host_name {
            return host.clone();
        }
        hostname::get()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    fn current_pid(&self) -> u32 {
        std::process::id()
    }

    fn probe(&self, pid: u32) -> Liveness {
        probe_pid(pid)
    }
}

/// Signal-0 probe. `EPERM` means the pid belongs to a process we may not
/// signal, which is still a live process.
#[cfg(unix)]
fn probe_pid(pid: u32) -> Liveness {
    use nix::errno::Errno;
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    // Zero and negative values address process groups, not a process.
    let raw = match i32::try_from(pid) {
        Ok(raw) if raw > 0 => raw,
        _ => return Liveness::Dead,
    };

    match kill(Pid::from_raw(raw), None) {
        Ok(()) | Err(Errno::EPERM) => Liveness::Alive,
        Err(_) => Liveness::Dead,
    }
}

/// Without a signal-0 probe, assume the holder is alive.
#[cfg(not(unix))]
fn probe_pid(pid: u32) -> Liveness {
    if pid == 0 {
        Liveness::Dead
    } else {
        Liveness::Alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_process_is_alive() {
        let host = SystemHost::new();
        assert_eq!(host.probe(host.current_pid()), Liveness::Alive);
    }

    #[test]
    fn pid_zero_is_dead() {
        assert_eq!(SystemHost::new().probe(0), Liveness::Dead);
    }

    #[cfg(unix)]
    #[test]
    fn pid_outside_signal_range_is_dead() {
        assert_eq!(SystemHost::new().probe(u32::MAX), Liveness::Dead);
    }

    #[cfg(unix)]
    #[test]
    fn exited_child_is_dead() {
        let mut child = std::process::Command::new("true").spawn().unwrap();
        let pid = child.id();
        child.wait().unwrap();
        assert_eq!(SystemHost::new().probe(pid), Liveness::Dead);
    }

    #[test]
    fn config_overrides_identity() {
        let config = Config {
            user_name: Some("alice".to_string()),
            host_name: Some("host1".to_string()),
            ..Config::default()
        };
        let host = SystemHost::from_config(&config);
        assert_eq!(host.user_name(), "alice");
        assert_eq!(host.host_name(), "host1");
        assert_eq!(host.current_pid(), std::process::id());
    }
}
