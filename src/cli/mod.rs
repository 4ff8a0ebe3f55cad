//! CLI argument parsing for clashlock.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// clashlock: advisory locks for files shared between editing sessions.
///
/// Locking `dir/name` creates the sibling record `dir/.#name` naming the
/// user, host and process holding it. Locks are advisory: they warn, they
/// never block writes.
#[derive(Parser, Debug)]
#[command(name = "clashlock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Flags shared by every command.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Path to a YAML config file.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands for clashlock.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show who holds the lock on each path.
    ///
    /// Stale locks left by dead processes are removed while checking.
    Status(StatusArgs),

    /// Lock a file while running a command.
    ///
    /// The lock is released when the command exits. If another live
    /// process holds the lock, the command is not run unless
    /// `--take-over` is given.
    Run(RunArgs),

    /// Print the lock record path for each file.
    LockPath(LockPathArgs),
}

/// Arguments for the `status` command.
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Print machine-readable JSON.
    #[arg(long)]
    pub json: bool,

    /// Files to check.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Take the lock over if another process holds it.
    #[arg(long)]
    pub take_over: bool,

    /// File to lock.
    pub path: PathBuf,

    /// Command to run while the lock is held.
    #[arg(last = true, required = true)]
    pub command: Vec<OsString>,
}

/// Arguments for the `lock-path` command.
#[derive(Parser, Debug)]
pub struct LockPathArgs {
    /// Files to map.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}
