//! Lock tokens: who holds a lock.
//!
//! A token is the entire content of a lock record, serialized as
//!
//! ```text
//! user@host.pid
//! user@host.pid:boottime
//! ```
//!
//! The boot time is only written when it is known. The format has no
//! version field and must stay readable by older writers of the same
//! scheme, so parsing is lenient: a non-numeric pid reads as `0` and a
//! missing or unreadable boot time reads as unknown. Only the two
//! delimiters are mandatory.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;


/// Ownership data carried by a lock record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LockToken {
    user: String,
    host: String,
    pid: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    boot_time: Option<i64>,
}

/// Why a lock record's content could not be read as a token.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseTokenError {
    #[error("missing '@' between user and host")]
    MissingAt,

    #[error("missing '.' between host and pid")]
    MissingDot,

    #[error("last '.' precedes the '@', so there is no host segment")]
    DotBeforeAt,
}

impl LockToken {
    /// Create a token.
    ///
    /// A boot time of `0` means "unknown" in the on-disk format and is
    /// stored as `None`.
    pub fn new(
        user: impl Into<String>,
        host: impl Into<String>,
        pid: u32,
        boot_time: Option<i64>,
    ) -> Self {
        Self {
            user: user.into(),
            host: host.into(),
            pid,
            boot_time: boot_time.filter(|&t| t != 0),
        }
    }

    /// Parse the content of a lock record.
    ///
    /// Total over all inputs: returns a token or a [`ParseTokenError`],
    /// never panics.
    pub fn parse(content: &str) -> Result<Self, ParseTokenError> {
        let at = content.find('@').ok_or(ParseTokenError::MissingAt)?;
        let dot = content.rfind('.').ok_or(ParseTokenError::MissingDot)?;
        if dot < at {
            return Err(ParseTokenError::DotBeforeAt);
        }

        let user = &content[..at];
        let host = &content[at + 1..dot];
        let (pid_text, boot_text) = match content[dot + 1..].split_once(':') {
            Some((pid, boot)) => (pid, Some(boot)),
            None => (&content[dot + 1..], None),
        };

        Ok(Self::new(
            user,
            host,
            parse_pid(pid_text),
            boot_text.and_then(parse_boot_time),
        ))
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Boot time of `host` (Unix seconds) when the lock was taken.
    pub fn boot_time(&self) -> Option<i64> {
        self.boot_time
    }

    /// Human-readable holder description, e.g. `alice@host1 (pid 4242)`.
    pub fn owner_display(&self) -> String {
        format!("{}@{} (pid {})", self.user, self.host, self.pid)
    }
}

impl fmt::Display for LockToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}.{}", self.user, self.host, self.pid)?;
        if let Some(boot_time) = self.boot_time {
            write!(f, ":{}", boot_time)?;
        }
        Ok(())
    }
}

impl FromStr for LockToken {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Leading run of ASCII digits.
fn leading_digits(text: &str) -> &str {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    &text[..end]
}

/// Non-numeric or out-of-range pids read as 0.
fn parse_pid(text: &str) -> u32 {
    let text = text.trim_start();
    let text = text.strip_prefix('+').unwrap_or(text);
    leading_digits(text).parse().unwrap_or(0)
}

fn parse_boot_time(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let value: i64 = leading_digits(rest).parse().ok()?;
    let value = if negative { -value } else { value };
    (value != 0).then_some(value)
}
