//! Resilience patterns for transient failures
//!
//! This module provides a **generic** retry executor. The caller supplies a
//! [`RetryPolicy`] that classifies its own error type and picks the delay,
//! plus a [`RetryConfig`] that bounds the number of attempts. A
//! [`Sleeper`](crate::time::Sleeper) performs the waits between attempts.
//!
//! The executor never sleeps on its own, which keeps every delay observable
//! and mockable in tests.

pub mod retry;

// Re-export retry types
pub use retry::{
    RetryConfig, RetryDecision, RetryError, RetryExecutor, RetryOutcome, RetryPolicy, RetryResult,
};
