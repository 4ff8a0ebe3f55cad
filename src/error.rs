//! Error types for clashlock.
//!
//! Uses thiserror for derive macros. A conflict with a live lock holder is
//! not an error at the library level (see [`crate::locks::AcquireOutcome`]);
//! `LockHeld` only exists so the CLI can report an abandoned attempt.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for clashlock operations.
#[derive(Error, Debug)]
pub enum ClashError {
    /// User provided invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// The lock record exists but its content cannot be parsed, so the lock
    /// status cannot be determined.
    #[error("cannot determine lock status: malformed lock record '{}' (content: {content:?})", path.display())]
    InvalidRecord { path: PathBuf, content: String },

    /// A filesystem operation failed for a reason other than
    /// "already exists" or "not found".
    #[error("failed to {action} '{}': {source}", path.display())]
    System {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Another live process holds the lock and the attempt was abandoned.
    #[error("file is locked by {0}")]
    LockHeld(String),
}

impl ClashError {
    /// Build a `System` error for a failed filesystem action on `path`.
    pub(crate) fn system(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        ClashError::System {
            action,
            path: path.into(),
            source,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ClashError::UserError(_) => exit_codes::USER_ERROR,
            ClashError::InvalidRecord { .. } => exit_codes::INVALID_RECORD,
            ClashError::System { .. } => exit_codes::SYSTEM_FAILURE,
            ClashError::LockHeld(_) => exit_codes::LOCK_FAILURE,
        }
    }
}

/// Result type alias for clashlock operations.
pub type Result<T> = std::result::Result<T, ClashError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = ClashError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn invalid_record_has_correct_exit_code() {
        let err = ClashError::InvalidRecord {
            path: PathBuf::from("dir/.#notes.txt"),
            content: "garbage".to_string(),
        };
        assert_eq!(err.exit_code(), exit_codes::INVALID_RECORD);
    }

    #[test]
    fn system_error_has_correct_exit_code() {
        let err = ClashError::system(
            "remove stale lock",
            "dir/.#notes.txt",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert_eq!(err.exit_code(), exit_codes::SYSTEM_FAILURE);
    }

    #[test]
    fn lock_held_has_correct_exit_code() {
        let err = ClashError::LockHeld("alice@host1 (pid 4242)".to_string());
        assert_eq!(err.exit_code(), exit_codes::LOCK_FAILURE);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = ClashError::InvalidRecord {
            path: PathBuf::from("dir/.#notes.txt"),
            content: "nodelimiters".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot determine lock status: malformed lock record 'dir/.#notes.txt' (content: \"nodelimiters\")"
        );

        let err = ClashError::LockHeld("bob@otherhost (pid 99)".to_string());
        assert_eq!(err.to_string(), "file is locked by bob@otherhost (pid 99)");

        let err = ClashError::system(
            "read lock record",
            "a/.#b",
            io::Error::new(io::ErrorKind::Other, "boom"),
        );
        assert_eq!(err.to_string(), "failed to read lock record 'a/.#b': boom");
    }
}
