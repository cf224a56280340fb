//! # sqs-operator Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The AWS SQS queue service adapter
//! - The `SQSQueue` custom resource and the Kubernetes record store
//! - Configuration loading
//! - Conversions from AWS and Kubernetes errors into domain errors
//!
//! ## Architecture
//! - Implements traits defined in `sqs-operator-core`
//! - Contains all "impure" code (network I/O, file and environment access)

pub mod aws;
pub mod config;
pub mod errors;
pub mod k8s;

// Re-export commonly used items
pub use aws::{build_client, SqsQueueService};
pub use errors::InfraError;
pub use k8s::{KubeRecordStore, QueueResourceSpec, SQSQueue};
