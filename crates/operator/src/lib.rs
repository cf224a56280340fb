//! # sqs-operator
//!
//! Kubernetes controller that keeps `SQSQueue` resources and their remote
//! queues in step.

pub mod context;
pub mod controller;
pub mod utils;

pub use context::OperatorContext;
