//! Interview identity, status and the persisted fields the expiry core reads.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ExpiryError;

/// Opaque interview identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterviewId(String);

impl InterviewId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InterviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InterviewId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for InterviewId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Lifecycle status of an interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    /// Invited, not yet started by the candidate.
    Pending,
    /// Candidate is taking the interview.
    InProgress,
    /// Candidate submitted the interview.
    Completed,
    /// Cancelled manually or by time-limit expiry.
    Cancelled,
}

impl InterviewStatus {
    /// Terminal states admit no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterviewStatus {
    type Err = ExpiryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(ExpiryError::Persistence(format!(
                "unknown interview status `{other}`"
            ))),
        }
    }
}

/// Authoritative interview fields loaded from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewRecord {
    /// Interview identifier.
    pub id: InterviewId,
    /// Current status.
    pub status: InterviewStatus,
    /// When the candidate began, if ever.
    pub started_at: Option<DateTime<Utc>>,
    /// When the candidate submitted, if ever.
    pub completed_at: Option<DateTime<Utc>>,
    /// Time limit inherited from the quiz. `None` or `<= 0` means unlimited.
    pub time_limit_minutes: Option<i32>,
}

impl InterviewRecord {
    /// A freshly invited interview with no timestamps.
    pub fn pending(id: impl Into<InterviewId>, time_limit_minutes: Option<i32>) -> Self {
        Self {
            id: id.into(),
            status: InterviewStatus::Pending,
            started_at: None,
            completed_at: None,
            time_limit_minutes,
        }
    }

    /// Whether the record is eligible for an expiry check at all.
    #[must_use]
    pub fn is_timed_and_running(&self) -> bool {
        self.started_at.is_some()
            && self.completed_at.is_none()
            && !self.status.is_terminal()
            && self.time_limit_minutes.is_some_and(|m| m > 0)
    }
}
