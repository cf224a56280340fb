//! Time abstractions for async code
//!
//! Code that waits should depend on [`Sleeper`] instead of calling
//! `tokio::time::sleep` directly, so tests can substitute a sleeper that
//! records the requested delay and returns immediately.

pub mod sleeper;

pub use sleeper::{Sleeper, TokioSleeper};
