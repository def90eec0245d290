use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid learning status: {0:?}")]
pub struct StatusParseError(pub String);

//
// ─── STATUS ───────────────────────────────────────────────────────────────────
//

/// Per-item learning state.
///
/// An item that has never been marked is `Unlearned`; the persisted form of each
/// variant is its lowercase literal (`"unlearned"`, `"learning"`, `"learned"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Unlearned,
    Learning,
    Learned,
}

impl Status {
    /// Display order used by status pickers.
    pub const ALL: [Status; 3] = [Status::Unlearned, Status::Learning, Status::Learned];

    /// Persisted literal for this status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Unlearned => "unlearned",
            Status::Learning => "learning",
            Status::Learned => "learned",
        }
    }

    /// Fixed UI label for this status.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Status::Unlearned => "Not learned",
            Status::Learning => "In progress",
            Status::Learned => "Learned",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unlearned" => Ok(Status::Unlearned),
            "learning" => Ok(Status::Learning),
            "learned" => Ok(Status::Learned),
            other => Err(StatusParseError(other.to_string())),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
