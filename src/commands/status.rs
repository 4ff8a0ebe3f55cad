//! Implementation of the `clashlock status` command.

use super::{absolute_target, build_manager};
use crate::cli::StatusArgs;
use crate::config::Config;
use crate::error::{ClashError, Result};
use crate::exit_codes;
use crate::locks::Classification;
use crate::token::LockToken;
use chrono::DateTime;
use serde::Serialize;
use std::path::PathBuf;

/// Lock status of one path, as printed by `status`.
#[derive(Debug, Serialize)]
pub(super) struct PathReport {
    pub path: PathBuf,
    pub lock_path: PathBuf,
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder: Option<LockToken>,
}

impl PathReport {
    pub(super) fn new(path: PathBuf, lock_path: PathBuf, classification: Classification) -> Self {
        let (state, holder) = match classification {
            Classification::Unlocked => ("unlocked", None),
            Classification::OwnedBySelf => ("locked_by_self", None),
            Classification::HeldByOther(token) => ("locked_by_other", Some(token)),
        };
        Self {
            path,
            lock_path,
            state,
            holder,
        }
    }

    /// One-line human-readable summary.
    pub(super) fn summary(&self) -> String {
        let Some(holder) = &self.holder else {
            let state = match self.state {
                "locked_by_self" => "locked by this process",
                _ => "unlocked",
            };
            return format!("{}: {}", self.path.display(), state);
        };

        let mut line = format!("{}: locked by {}", self.path.display(), holder.owner_display());
        if let Some(booted) = holder
            .boot_time()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
        {
            line.push_str(&format!(
                ", host booted {}",
                booted.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }
        line
    }
}

/// Execute the `clashlock status` command.
///
/// Classifies each path's lock record; stale records are removed along the
/// way. Fails on the first path whose lock status cannot be determined.
pub fn cmd_status(args: StatusArgs, config: &Config) -> Result<i32> {
    let manager = build_manager(config);

    let mut reports = Vec::with_capacity(args.paths.len());
    for path in &args.paths {
        let target = absolute_target(path)?;
        let lock_path = manager.lock_path(&target)?;
        let classification = manager.classify(&target)?;
        reports.push(PathReport::new(target, lock_path, classification));
    }

    if args.json {
        let json = serde_json::to_string_pretty(&reports).map_err(|e| {
            ClashError::UserError(format!("failed to serialize status report: {}", e))
        })?;
        println!("{}", json);
    } else {
        for report in &reports {
            println!("{}", report.summary());
        }
    }

    Ok(exit_codes::SUCCESS)
}
