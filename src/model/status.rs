//! Outcome codes reported by registry and timeline operations.

use serde::{Deserialize, Serialize};

use crate::Result;

/// Outcome of an operation, as reported to callers.
///
/// `Success` is never carried by a [`crate::Error`]; every other code corresponds
/// to exactly one expected-outcome error variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Success,
    AlreadyActive,
    AlreadyInactive,
    AlreadyValid,
    InvalidUsers,
    InvalidDate,
    InvalidDistance,
}

impl Status {
    /// Status of an operation result.
    ///
    /// Returns `None` when the result is a contract violation
    /// (missing value or uninitialized entity), which has no status code.
    pub fn of<T>(result: &Result<T>) -> Option<Status> {
        match result {
            Ok(_) => Some(Status::Success),
            Err(e) => e.status(),
        }
    }

    pub fn is_success(self) -> bool {
        self == Status::Success
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::Success => "SUCCESS",
            Status::AlreadyActive => "ALREADY_ACTIVE",
            Status::AlreadyInactive => "ALREADY_INACTIVE",
            Status::AlreadyValid => "ALREADY_VALID",
            Status::InvalidUsers => "INVALID_USERS",
            Status::InvalidDate => "INVALID_DATE",
            Status::InvalidDistance => "INVALID_DISTANCE",
        };
        f.write_str(s)
    }
}
