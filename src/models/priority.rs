use serde::{Deserialize, Serialize};
use std::fmt;

/// Types of scheduled event that may appear on a prisoner's day
///
/// Each type carries a hard-coded default priority used when a prison has no
/// override configured. Lower numbers sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduledEventType {
    CourtHearing,
    ExternalTransfer,
    AdjudicationHearing,
    Visit,
    Appointment,
    Activity,
}

impl ScheduledEventType {
    pub fn default_priority(&self) -> i32 {
        match self {
            Self::CourtHearing => 1,
            Self::ExternalTransfer => 2,
            Self::AdjudicationHearing => 3,
            Self::Visit => 4,
            Self::Appointment => 5,
            Self::Activity => 6,
        }
    }
}

impl fmt::Display for ScheduledEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CourtHearing => write!(f, "COURT_HEARING"),
            Self::ExternalTransfer => write!(f, "EXTERNAL_TRANSFER"),
            Self::AdjudicationHearing => write!(f, "ADJUDICATION_HEARING"),
            Self::Visit => write!(f, "VISIT"),
            Self::Appointment => write!(f, "APPOINTMENT"),
            Self::Activity => write!(f, "ACTIVITY"),
        }
    }
}

/// Event categories used to reconcile the differing naming conventions of
/// the upstream source systems
///
/// Each category owns a code prefix; a scheduled event's raw category code
/// is matched to a category when it starts with that prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventCategory {
    Education,
    FaithSpirituality,
    GymSportsFitness,
    Induction,
    Industries,
    Interventions,
    LeisureSocial,
    Services,
    Other,
}

impl EventCategory {
    pub fn code_prefix(&self) -> &'static str {
        match self {
            Self::Education => "EDU",
            Self::FaithSpirituality => "FAI",
            Self::GymSportsFitness => "GYM",
            Self::Induction => "INDUC",
            Self::Industries => "INDUS",
            Self::Interventions => "INT",
            Self::LeisureSocial => "LEI",
            Self::Services => "SER",
            Self::Other => "OTH",
        }
    }

    /// Match a raw upstream category code against this category's prefix
    pub fn matches(&self, category_code: &str) -> bool {
        category_code.starts_with(self.code_prefix())
    }
}

/// A prison-configured priority override for an event type, optionally
/// narrowed to a single category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPriorityOverride {
    pub prison_code: String,
    pub event_type: ScheduledEventType,
    pub category: Option<EventCategory>,
    pub priority: i32,
}
