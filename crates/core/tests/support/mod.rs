//! Shared test helpers for `sqs-operator-core` integration tests.
//!
//! In-memory fakes for the queue service and record store ports, so that
//! reconciliation tests can script service behaviour and inspect every call.

pub mod queues;
