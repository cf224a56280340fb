//! AWS adapters

pub mod sqs_client;

pub use sqs_client::{build_client, SqsQueueService};
