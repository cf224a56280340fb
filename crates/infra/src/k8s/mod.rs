//! Kubernetes adapters: the `SQSQueue` custom resource and the annotation
//! store backed by it

pub mod crd;
pub mod record_store;

pub use crd::{QueueResourceSpec, SQSQueue};
pub use record_store::{annotation_patch, KubeRecordStore};
