//! # sqs-operator Core
//!
//! Pure reconciliation logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - The attribute codec and drift detector (pure functions)
//! - Port interfaces (traits) for the queue service and the record store
//! - The reconciliation engine that sequences probe, mutate and annotate
//!
//! ## Architecture Principles
//! - Only depends on `sqs-operator-common` and `sqs-operator-domain`
//! - No AWS, Kubernetes or HTTP code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod reconcile;

// Re-export specific items to avoid ambiguity
pub use reconcile::ports::{QueueService, RecordStore};
pub use reconcile::{
    build_attributes, has_changed, CreateOutcome, IdentityAnnotator, MutationExecutor,
    QueueReconciler, ReconcileOutcome, RemoteProber,
};
