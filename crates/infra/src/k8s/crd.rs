//! `SQSQueue` custom resource definition

use kube::{CustomResource, ResourceExt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sqs_operator_domain::{QueueRecord, SqsQueueSpec};

/// Spec block of an `SQSQueue` object
#[derive(CustomResource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "sqs.operator.k8s.io",
    version = "v1",
    kind = "SQSQueue",
    plural = "sqsqueues",
    shortname = "sqsq",
    namespaced,
    printcolumn = r#"{"name":"Queue","type":"string","jsonPath":".spec.name"}"#,
    printcolumn = r#"{"name":"Fifo","type":"boolean","jsonPath":".spec.fifoQueue"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
pub struct QueueResourceSpec {
    #[serde(flatten)]
    pub queue: SqsQueueSpec,
}

impl From<&SQSQueue> for QueueRecord {
    fn from(resource: &SQSQueue) -> Self {
        let record = QueueRecord::new(resource.name_any(), resource.spec.queue.clone())
            .with_annotations(resource.annotations().clone());
        match resource.namespace() {
            Some(namespace) => record.with_namespace(namespace),
            None => record,
        }
    }
}
