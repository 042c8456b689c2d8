//! # Configuration Management
//!
//! Runtime configuration for the allocation core: retry defaults for
//! outbound upstream calls and the closed set of feature switches gating
//! inbound event processing. Values come from the environment with sensible
//! defaults for local development.

use crate::error::{ActivitiesError, Result};

/// Retry defaults applied to outbound upstream API calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_ms: 250,
        }
    }
}

/// Closed set of switches gating which inbound event kinds are processed
///
/// A disabled kind is dropped silently and reported as successfully
/// processed, so the transport never requeues it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSwitches {
    pub released_events: bool,
    pub received_events: bool,
    pub interesting_events: bool,
}

impl Default for FeatureSwitches {
    fn default() -> Self {
        Self {
            released_events: true,
            received_events: true,
            interesting_events: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreConfig {
    pub retry: RetryConfig,
    pub features: FeatureSwitches,
}

impl CoreConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(max_attempts) = std::env::var("ACTIVITIES_RETRY_MAX_ATTEMPTS") {
            config.retry.max_attempts = max_attempts.parse().map_err(|e| {
                ActivitiesError::configuration(format!("Invalid retry max_attempts: {e}"))
            })?;
        }

        if let Ok(backoff_ms) = std::env::var("ACTIVITIES_RETRY_BACKOFF_MS") {
            config.retry.backoff_ms = backoff_ms.parse().map_err(|e| {
                ActivitiesError::configuration(format!("Invalid retry backoff_ms: {e}"))
            })?;
        }

        config.features.released_events =
            switch_from_env("ACTIVITIES_RELEASED_EVENTS_ENABLED", true)?;
        config.features.received_events =
            switch_from_env("ACTIVITIES_RECEIVED_EVENTS_ENABLED", true)?;
        config.features.interesting_events =
            switch_from_env("ACTIVITIES_INTERESTING_EVENTS_ENABLED", true)?;

        Ok(config)
    }
}

fn switch_from_env(name: &str, default: bool) -> Result<bool> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|e| {
            ActivitiesError::configuration(format!("Invalid boolean for {name}: {e}"))
        }),
        Err(_) => Ok(default),
    }
}
