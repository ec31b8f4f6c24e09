//! Thread execution states as reported by `java.lang.Thread.State:` lines.

use crate::utils::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Execution state of a thread at the moment the dump was taken
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreadState {
    New,
    #[default]
    Runnable,
    Blocked,
    Waiting,
    TimedWaiting,
    Terminated,
}

impl ThreadState {
    /// All states, in declaration order
    pub const ALL: [ThreadState; 6] = [
        Self::New,
        Self::Runnable,
        Self::Blocked,
        Self::Waiting,
        Self::TimedWaiting,
        Self::Terminated,
    ];

    /// Parse a dump state token
    ///
    /// **Public** - the only way a string becomes a `ThreadState`
    ///
    /// # Errors
    /// * `ParseError::InvalidThreadState` - token is not one of the six dump tokens
    pub fn parse(token: &str) -> Result<Self, ParseError> {
        match token {
            "NEW" => Ok(Self::New),
            "RUNNABLE" => Ok(Self::Runnable),
            "BLOCKED" => Ok(Self::Blocked),
            "WAITING" => Ok(Self::Waiting),
            "TIMED_WAITING" => Ok(Self::TimedWaiting),
            "TERMINATED" => Ok(Self::Terminated),
            other => Err(ParseError::InvalidThreadState(other.to_string())),
        }
    }

    /// Token used for this state in thread dumps
    pub fn as_token(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Runnable => "RUNNABLE",
            Self::Blocked => "BLOCKED",
            Self::Waiting => "WAITING",
            Self::TimedWaiting => "TIMED_WAITING",
            Self::Terminated => "TERMINATED",
        }
    }
}

impl std::str::FromStr for ThreadState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ThreadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}
