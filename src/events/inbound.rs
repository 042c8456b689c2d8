//! # Inbound Prisoner Lifecycle Events
//!
//! The envelope delivered by the queue listener and the reason-code
//! vocabulary that classifies a release as temporary or permanent. Reason
//! codes are matched case-sensitively; an unrecognized code classifies as
//! neither temporary nor permanent and the event becomes a logged no-op,
//! preserving forward compatibility with new upstream reason codes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::events;

/// Raw event envelope as delivered by the queue listener
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundEvent {
    pub event_type: String,
    pub prisoner_number: String,
    pub prison_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl InboundEvent {
    /// Classify the envelope into the lifecycle event union
    pub fn to_prisoner_event(&self) -> PrisonerEvent {
        match self.event_type.as_str() {
            events::PRISONER_RELEASED => PrisonerEvent::Released {
                prisoner_number: self.prisoner_number.clone(),
                prison_code: self.prison_code.clone(),
                reason: ReleaseReason::from_code(self.reason.as_deref().unwrap_or_default()),
            },
            events::PRISONER_RECEIVED => PrisonerEvent::Received {
                prisoner_number: self.prisoner_number.clone(),
                prison_code: self.prison_code.clone(),
                reason: ReceivedReason::from_code(self.reason.as_deref().unwrap_or_default()),
            },
            other => PrisonerEvent::Interesting {
                kind: other.to_string(),
                prisoner_number: self.prisoner_number.clone(),
                prison_code: self.prison_code.clone(),
            },
        }
    }
}

/// Tagged union of prisoner lifecycle event kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrisonerEvent {
    Released {
        prisoner_number: String,
        prison_code: String,
        reason: ReleaseReason,
    },
    Received {
        prisoner_number: String,
        prison_code: String,
        reason: ReceivedReason,
    },
    /// Cell moves, incentive reviews, non-associations, alerts - anything
    /// worth observing but not driving allocation transitions
    Interesting {
        kind: String,
        prisoner_number: String,
        prison_code: String,
    },
}

/// Reason a prisoner was released from prison
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseReason {
    TemporaryAbsenceRelease,
    ReleasedToHospital,
    SentToCourt,
    Released,
    Transferred,
    /// Not in the known vocabulary; neither temporary nor permanent
    Unknown(String),
}

impl ReleaseReason {
    pub fn from_code(code: &str) -> Self {
        match code {
            "TEMPORARY_ABSENCE_RELEASE" => Self::TemporaryAbsenceRelease,
            "RELEASED_TO_HOSPITAL" => Self::ReleasedToHospital,
            "SENT_TO_COURT" => Self::SentToCourt,
            "RELEASED" => Self::Released,
            "TRANSFERRED" => Self::Transferred,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Prisoner expected back; allocations are auto-suspended, not ended
    pub fn is_temporary(&self) -> bool {
        matches!(
            self,
            Self::TemporaryAbsenceRelease | Self::ReleasedToHospital | Self::SentToCourt
        )
    }

    /// Prisoner not coming back; allocations are ended
    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::Released | Self::Transferred)
    }
}

impl fmt::Display for ReleaseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TemporaryAbsenceRelease => write!(f, "TEMPORARY_ABSENCE_RELEASE"),
            Self::ReleasedToHospital => write!(f, "RELEASED_TO_HOSPITAL"),
            Self::SentToCourt => write!(f, "SENT_TO_COURT"),
            Self::Released => write!(f, "RELEASED"),
            Self::Transferred => write!(f, "TRANSFERRED"),
            Self::Unknown(code) => write!(f, "{code}"),
        }
    }
}

/// Reason a prisoner was received into prison
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceivedReason {
    TemporaryAbsenceReturn,
    ReturnFromCourt,
    Admission,
    Transferred,
    Unknown(String),
}

impl ReceivedReason {
    pub fn from_code(code: &str) -> Self {
        match code {
            "TEMPORARY_ABSENCE_RETURN" => Self::TemporaryAbsenceReturn,
            "RETURN_FROM_COURT" => Self::ReturnFromCourt,
            "ADMISSION" => Self::Admission,
            "TRANSFERRED" => Self::Transferred,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Only returns from a temporary absence reverse auto-suspensions
    pub fn is_return_from_temporary_absence(&self) -> bool {
        matches!(self, Self::TemporaryAbsenceReturn | Self::ReturnFromCourt)
    }
}

impl fmt::Display for ReceivedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TemporaryAbsenceReturn => write!(f, "TEMPORARY_ABSENCE_RETURN"),
            Self::ReturnFromCourt => write!(f, "RETURN_FROM_COURT"),
            Self::Admission => write!(f, "ADMISSION"),
            Self::Transferred => write!(f, "TRANSFERRED"),
            Self::Unknown(code) => write!(f, "{code}"),
        }
    }
}
