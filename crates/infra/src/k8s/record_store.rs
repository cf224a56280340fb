//! Annotation persistence through the Kubernetes API

use async_trait::async_trait;
use kube::api::{Patch, PatchParams};
use kube::{Api, Client};
use serde_json::{json, Value};
use sqs_operator_core::RecordStore;
use sqs_operator_domain::{OperatorError, QueueRecord, Result};
use tracing::{debug, instrument};

use super::crd::SQSQueue;
use crate::errors::InfraError;

/// JSON merge patch that sets every annotation on `record`.
///
/// The reconciler hands over a record holding only its own `<prefix>/` keys;
/// every other annotation on the object is left to the server untouched.
pub fn annotation_patch(record: &QueueRecord) -> Value {
    json!({ "metadata": { "annotations": record.annotations } })
}

/// Writes record annotations back onto the `SQSQueue` object
#[derive(Clone)]
pub struct KubeRecordStore {
    client: Client,
}

impl KubeRecordStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecordStore for KubeRecordStore {
    #[instrument(skip(self, record), fields(record = %record.key()))]
    async fn persist(&self, record: &QueueRecord) -> Result<()> {
        let namespace = record.namespace.as_deref().ok_or_else(|| {
            OperatorError::RecordStore(format!("record {} has no namespace", record.name))
        })?;
        let api: Api<SQSQueue> = Api::namespaced(self.client.clone(), namespace);

        api.patch(&record.name, &PatchParams::default(), &Patch::Merge(annotation_patch(record)))
            .await
            .map_err(InfraError::from)?;

        debug!(annotations = record.annotations.len(), "annotations persisted");
        Ok(())
    }
}
