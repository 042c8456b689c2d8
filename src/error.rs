//! # Structured Error Handling
//!
//! Crate-wide error type aggregating the failure classes of the allocation
//! core. Persistence failures are fatal to the current event-processing
//! attempt and propagate uncaught; redelivery is the responsibility of the
//! owning message transport.

use thiserror::Error;

use crate::events::publisher::PublishError;
use crate::repository::RepositoryError;

#[derive(Debug, Error)]
pub enum ActivitiesError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error("No prison regime configured for {prison_code}")]
    RegimeNotFound { prison_code: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ActivitiesError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn regime_not_found(prison_code: impl Into<String>) -> Self {
        Self::RegimeNotFound {
            prison_code: prison_code.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ActivitiesError>;
