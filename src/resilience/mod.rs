//! # Resilience Module
//!
//! Data-driven retry for outbound calls to unreliable upstream HTTP
//! dependencies. The policy is a plain value carrying max attempts and
//! backoff delay, applied by a generic wrapper around any fallible async
//! operation with a caller-supplied retryable predicate.
//!
//! ## Usage
//!
//! ```rust
//! use activities_core::client::ApiError;
//! use activities_core::resilience::{call_api_with_retry, RetryPolicy};
//!
//! # tokio_test::block_on(async {
//! let policy = RetryPolicy::default();
//!
//! let response = call_api_with_retry(policy, || async {
//!     // Upstream HTTP call here
//!     Ok::<&str, ApiError>("ok")
//! })
//! .await
//! .unwrap();
//!
//! assert_eq!(response, "ok");
//! # });
//! ```

pub mod retry;

pub use retry::{call_api_with_retry, call_with_retry, RetryPolicy};
