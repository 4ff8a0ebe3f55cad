//! Implementation of the `clashlock run` command.

use super::{absolute_target, build_manager};
use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::{ClashError, Result};
use crate::exit_codes;
use crate::locks::{LockDecision, Resolution};
use std::path::Path;
use std::process::{Command, ExitStatus};

/// Execute the `clashlock run` command.
///
/// Locks the target, runs the command, and releases the lock once the
/// command exits (or fails to start).
///
/// # Returns
///
/// * `Ok(code)` - The command's exit code
/// * `Err(ClashError::LockHeld)` - Another process holds the lock and
///   `--take-over` was not given
pub fn cmd_run(args: RunArgs, config: &Config) -> Result<i32> {
    let target = absolute_target(&args.path)?;
    let mut manager = build_manager(config);

    let take_over = args.take_over;
    let mut holder = None;
    let mut resolver = |_: &Path, owner: &str| {
        holder = Some(owner.to_string());
        if take_over {
            Resolution::TakeOverLock
        } else {
            Resolution::AbandonAttempt
        }
    };

    let Some(guard) = manager.guard(&target, &mut resolver)? else {
        return Err(ClashError::LockHeld(holder.unwrap_or_default()));
    };
    if let LockDecision::TookOver { previous } = guard.decision() {
        eprintln!(
            "Warning: took over lock on '{}' from {}",
            target.display(),
            previous.owner_display()
        );
    }

    let (program, program_args) = args
        .command
        .split_first()
        .ok_or_else(|| ClashError::UserError("no command given".to_string()))?;

    let status = Command::new(program)
        .args(program_args)
        .status()
        .map_err(|e| {
            ClashError::UserError(format!(
                "failed to run '{}': {}",
                program.to_string_lossy(),
                e
            ))
        })?;

    guard.release()?;
    Ok(exit_code_of(status))
}

/// Exit code to report for a finished child, `128 + signal` if it was killed.
fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    exit_codes::SYSTEM_FAILURE
}
