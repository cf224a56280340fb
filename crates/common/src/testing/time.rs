//! Sleep mocking for deterministic tests
//!
//! [`MockSleeper`] implements [`Sleeper`] by recording each requested delay
//! and returning immediately, so code paths that wait minutes in production
//! run instantly in tests while the delay stays observable.

// Allow missing panics docs for test utilities - a poisoned mutex should fail
// the test early
#![allow(clippy::missing_panics_doc)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::time::Sleeper;

/// Mock sleeper for deterministic testing
///
/// Clones share the same record, so a test can keep one handle and pass
/// another into the code under test.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use sqs_operator_common::testing::MockSleeper;
///
/// let sleeper = MockSleeper::new();
/// assert!(sleeper.sleeps().is_empty());
/// assert_eq!(sleeper.total(), Duration::ZERO);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockSleeper {
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl MockSleeper {
    /// Create a new mock sleeper with an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// All requested delays, in call order
    #[must_use]
    pub fn sleeps(&self) -> Vec<Duration> {
        // Test utility: panic on poisoned mutex to fail tests early
        self.sleeps.lock().expect("mutex poisoned").clone()
    }

    /// Number of sleep calls observed
    #[must_use]
    pub fn count(&self) -> usize {
        self.sleeps.lock().expect("mutex poisoned").len()
    }

    /// Sum of all requested delays
    #[must_use]
    pub fn total(&self) -> Duration {
        self.sleeps.lock().expect("mutex poisoned").iter().sum()
    }
}

#[async_trait]
impl Sleeper for MockSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().expect("mutex poisoned").push(duration);
    }
}
