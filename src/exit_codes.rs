//! Exit code constants for the clashlock CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config)
//! - 2: Lock record exists but is malformed
//! - 3: Filesystem failure
//! - 4: Lock held by another process

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// The lock record could not be parsed; lock status is unknown.
pub const INVALID_RECORD: i32 = 2;

/// A filesystem operation on a lock record failed.
pub const SYSTEM_FAILURE: i32 = 3;

/// The lock is held by another live process and was not taken over.
pub const LOCK_FAILURE: i32 = 4;
