//! Operator context - dependency injection container

use std::sync::Arc;

use sqs_operator_core::QueueReconciler;
use sqs_operator_domain::{OperatorConfig, Result};
use sqs_operator_infra::{InfraError, KubeRecordStore, SqsQueueService};
use tracing::info;

/// Holds the shared clients and the reconciliation engine.
///
/// Built once at startup; every reconciliation borrows it through an `Arc`.
pub struct OperatorContext {
    pub config: OperatorConfig,
    pub client: kube::Client,
    pub reconciler: Arc<QueueReconciler>,
}

impl OperatorContext {
    /// Connect to the cluster and the queue service.
    ///
    /// # Errors
    /// Returns `OperatorError::RecordStore` when no Kubernetes configuration
    /// can be inferred.
    pub async fn new(config: OperatorConfig) -> Result<Self> {
        let client = kube::Client::try_default().await.map_err(InfraError::from)?;
        let queues = SqsQueueService::from_config(&config.aws).await;
        let store = KubeRecordStore::new(client.clone());

        let reconciler =
            QueueReconciler::new(Arc::new(queues), Arc::new(store), &config.reconcile);

        info!(
            region = config.aws.region.as_deref().unwrap_or("<default>"),
            endpoint = config.aws.endpoint_url.as_deref().unwrap_or("<default>"),
            namespace = config.controller.namespace.as_deref().unwrap_or("<all>"),
            "operator context initialised"
        );

        Ok(Self { config, client, reconciler: Arc::new(reconciler) })
    }
}
