use crate::host::{Host, Liveness};
use std::cell::Cell;
use std::collections::BTreeSet;
use std::path::Path;

/// Scripted host: fixed identity and an explicit set of live pids.
#[derive(Debug, Clone)]
pub(crate) struct FakeHost {
    user: String,
    host: String,
    pid: u32,
    alive: BTreeSet<u32>,
    probes: Cell<usize>,
}

impl FakeHost {
    /// Host `host` running our process as `pid`, which is alive.
    pub(crate) fn new(user: &str, host: &str, pid: u32) -> Self {
        Self {
            user: user.to_string(),
            host: host.to_string(),
            pid,
            alive: BTreeSet::from([pid]),
            probes: Cell::new(0),
        }
    }

    pub(crate) fn with_alive(mut self, pid: u32) -> Self {
        self.alive.insert(pid);
        self
    }

    /// How many liveness probes were made.
    pub(crate) fn probe_count(&self) -> usize {
        self.probes.get()
    }
}

impl Host for FakeHost {
    fn user_name(&self) -> String {
        self.user.clone()
    }

    fn host_name(&self) -> String {
        self.host.clone()
    }

    fn current_pid(&self) -> u32 {
        self.pid
    }

    fn probe(&self, pid: u32) -> Liveness {
        self.probes.set(self.probes.get() + 1);
        if self.alive.contains(&pid) {
            Liveness::Alive
        } else {
            Liveness::Dead
        }
    }
}

/// Write a lock record with arbitrary content, bypassing the token codec.
pub(crate) fn plant_record(lock_path: &Path, content: &str) {
    #[cfg(unix)]
    std::os::unix::fs::symlink(content, lock_path).unwrap();
    #[cfg(not(unix))]
    std::fs::write(lock_path, content).unwrap();
}

/// Whether a lock record entry exists. Symlink records dangle, so this
/// must not follow them.
pub(crate) fn record_exists(lock_path: &Path) -> bool {
    std::fs::symlink_metadata(lock_path).is_ok()
}
