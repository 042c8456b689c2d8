//! # Outbound Domain Event Publisher
//!
//! Serializes and publishes allocation/attendance domain events to the
//! downstream bus. Publishing is best-effort: network-level and validation
//! failures are recorded as telemetry under a `_FAILED` event name and
//! swallowed, while HTTP-level error responses and truly unexpected
//! failures are re-thrown after the telemetry is recorded.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Error types for event publishing
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Event bus network failure: {0}")]
    Network(String),

    #[error("Event payload failed validation: {0}")]
    Validation(String),

    #[error("Event bus returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unexpected publish failure: {0}")]
    Unexpected(String),
}

impl PublishError {
    /// Best-effort failures are swallowed after telemetry; the rest re-throw
    pub fn is_best_effort(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Validation(_) | Self::Serialization(_)
        )
    }
}

/// A domain event announced to the downstream bus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundEvent {
    pub event_type: String,
    pub additional_information: Value,
    pub version: String,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
}

impl OutboundEvent {
    pub fn new(
        event_type: impl Into<String>,
        description: impl Into<String>,
        additional_information: Value,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            additional_information,
            version: "1".to_string(),
            description: description.into(),
            occurred_at: Utc::now(),
        }
    }
}

/// Transport seam to the downstream message bus
#[async_trait]
pub trait EventBusClient: Send + Sync {
    async fn send(&self, payload: Value) -> Result<(), PublishError>;
}

/// Message observed on the in-memory bus
#[derive(Debug, Clone)]
pub struct PublishedMessage {
    pub correlation_id: Uuid,
    pub payload: Value,
    pub published_at: DateTime<Utc>,
}

/// In-process broadcast bus used by tests and local wiring
#[derive(Debug, Clone)]
pub struct InMemoryEventBus {
    sender: broadcast::Sender<PublishedMessage>,
}

impl InMemoryEventBus {
    /// Create a new bus with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to published messages
    pub fn subscribe(&self) -> broadcast::Receiver<PublishedMessage> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[async_trait]
impl EventBusClient for InMemoryEventBus {
    async fn send(&self, payload: Value) -> Result<(), PublishError> {
        let message = PublishedMessage {
            correlation_id: Uuid::new_v4(),
            payload,
            published_at: Utc::now(),
        };

        // A send error only means there are no subscribers, which is
        // acceptable for event publishing
        match self.sender.send(message) {
            Ok(_) => Ok(()),
            Err(broadcast::error::SendError(_)) => Ok(()),
        }
    }
}

/// Publisher applying the best-effort failure policy over a bus client
#[derive(Clone)]
pub struct DomainEventPublisher {
    client: std::sync::Arc<dyn EventBusClient>,
}

impl DomainEventPublisher {
    pub fn new(client: std::sync::Arc<dyn EventBusClient>) -> Self {
        Self { client }
    }

    /// Publish a domain event to the downstream bus
    ///
    /// Returns `Ok` for successful publishes and for swallowed best-effort
    /// failures; HTTP-level and unexpected failures are returned to the
    /// caller after telemetry is recorded.
    pub async fn publish(&self, event: OutboundEvent) -> Result<(), PublishError> {
        let event_type = event.event_type.clone();

        let result = async {
            let payload = serde_json::to_value(&event)?;
            self.client.send(payload).await
        }
        .await;

        match result {
            Ok(()) => {
                debug!(event_type = %event_type, "✉️ Domain event published");
                Ok(())
            }
            Err(error) => {
                let telemetry_name = format!("{event_type}_FAILED");
                if error.is_best_effort() {
                    warn!(
                        telemetry_event = %telemetry_name,
                        error = %error,
                        "Domain event publish failed, continuing (best effort)"
                    );
                    Ok(())
                } else {
                    crate::logging::log_error(
                        "domain_event_publisher",
                        &telemetry_name,
                        &error.to_string(),
                        Some(&event_type),
                    );
                    Err(error)
                }
            }
        }
    }
}

impl std::fmt::Debug for DomainEventPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomainEventPublisher").finish_non_exhaustive()
    }
}

impl Default for DomainEventPublisher {
    fn default() -> Self {
        let bus = InMemoryEventBus::default();
        info!("Domain event publisher defaulting to in-memory bus");
        Self::new(std::sync::Arc::new(bus))
    }
}
