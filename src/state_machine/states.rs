use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Metadata recorded when an allocation is suspended, whether by a user or
/// by the system in response to a temporary release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspensionDetails {
    pub suspended_by: String,
    pub suspended_reason: String,
    pub suspended_at: DateTime<Utc>,
}

/// Metadata recorded when an allocation is ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeallocationDetails {
    pub deallocated_by: String,
    pub deallocated_reason: String,
    pub deallocated_at: DateTime<Utc>,
}

/// Allocation lifecycle status
///
/// Suspension metadata only exists for the suspended variants and
/// deallocation metadata only for `Ended`, so an allocation can never carry
/// metadata inconsistent with its status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AllocationStatus {
    /// Prisoner is attending the activity
    Active,
    /// Suspended by a user action; not reversed automatically
    Suspended(SuspensionDetails),
    /// Suspended by the system on temporary release; reversed on return to custody
    AutoSuspended(SuspensionDetails),
    /// Terminal: the prisoner has been deallocated
    Ended(DeallocationDetails),
}

impl AllocationStatus {
    pub fn kind(&self) -> AllocationStatusKind {
        match self {
            Self::Active => AllocationStatusKind::Active,
            Self::Suspended(_) => AllocationStatusKind::Suspended,
            Self::AutoSuspended(_) => AllocationStatusKind::AutoSuspended,
            Self::Ended(_) => AllocationStatusKind::Ended,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn is_ended(&self) -> bool {
        matches!(self, Self::Ended(_))
    }

    /// Suspension metadata, present only for the suspended variants
    pub fn suspension(&self) -> Option<&SuspensionDetails> {
        match self {
            Self::Suspended(details) | Self::AutoSuspended(details) => Some(details),
            _ => None,
        }
    }

    /// Deallocation metadata, present only once ended
    pub fn deallocation(&self) -> Option<&DeallocationDetails> {
        match self {
            Self::Ended(details) => Some(details),
            _ => None,
        }
    }
}

/// Status discriminant used for logging, queries, and wire representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStatusKind {
    Active,
    Suspended,
    AutoSuspended,
    Ended,
}

impl AllocationStatusKind {
    /// Check if this is a terminal status (no further transitions allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ended)
    }
}

impl fmt::Display for AllocationStatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Suspended => write!(f, "suspended"),
            Self::AutoSuspended => write!(f, "auto_suspended"),
            Self::Ended => write!(f, "ended"),
        }
    }
}

impl std::str::FromStr for AllocationStatusKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "suspended" => Ok(Self::Suspended),
            "auto_suspended" => Ok(Self::AutoSuspended),
            "ended" => Ok(Self::Ended),
            _ => Err(format!("Invalid allocation status: {s}")),
        }
    }
}
