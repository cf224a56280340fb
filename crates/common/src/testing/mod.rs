//! Testing utilities and helpers
//!
//! - **[`time`]**: sleep doubles that record requested delays instead of
//!   waiting
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//!
//! use sqs_operator_common::testing::MockSleeper;
//!
//! let sleeper = MockSleeper::new();
//! assert_eq!(sleeper.count(), 0);
//! assert_eq!(sleeper.total(), Duration::ZERO);
//! ```

pub mod time;

pub use time::MockSleeper;
