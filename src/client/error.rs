//! # Upstream API Error Types
//!
//! Unified error handling for calls to the upstream systems of record
//! (prison records, incentives, case notes, non-associations,
//! adjudications). The retryable classification here is deliberately
//! narrow: connection-level transport failures and 502 Bad Gateway are the
//! only failures worth retrying, anything else propagates immediately.

use thiserror::Error;

/// Upstream call result type
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure classes for upstream API operations
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON serialization/deserialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Timeout waiting for operation: {operation}")]
    Timeout { operation: String },

    #[error("Invalid response: {field} - {reason}")]
    InvalidResponse { field: String, reason: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Create an API error from an HTTP response status
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an invalid response error for protocol violations
    pub fn invalid_response(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Check if this failure is worth retrying
    ///
    /// Retryable: connection-level transport failures (connection reset,
    /// read/connect timeout) and 502 Bad Gateway. Every other HTTP error
    /// status, 4xx and 5xx alike, is not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status == 502,
            Self::Timeout { .. } => true,
            Self::Serialization(_) | Self::InvalidResponse { .. } | Self::Internal(_) => false,
        }
    }
}
