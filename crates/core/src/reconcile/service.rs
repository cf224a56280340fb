//! Per-event reconciliation entry point

use std::fmt;
use std::sync::Arc;

use sqs_operator_common::{Sleeper, TokioSleeper};
use sqs_operator_domain::{
    AttributeMap, OperatorError, QueueHandle, QueueLocator, QueueRecord, ReconcileConfig, Result,
};
use tracing::{info, instrument};

use super::annotator::IdentityAnnotator;
use super::codec::build_attributes;
use super::drift::has_changed;
use super::executor::{CreateOutcome, MutationExecutor};
use super::ports::{QueueService, RecordStore};
use super::prober::RemoteProber;

/// What a reconciliation did to the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Created,
    Updated,
    Unchanged,
    Deleted,
}

impl ReconcileOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for ReconcileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of the queue once create or update has run
enum Converged {
    /// Pre-mutation snapshot that is still accurate
    Observed(QueueHandle, AttributeMap),
    /// The queue was written; read it back at this locator
    Mutated(QueueLocator),
}

/// Sequences probe, mutate, annotate and persist for one record.
///
/// Holds no per-queue state and no lock: callers must not reconcile the same
/// queue concurrently, and every step is safe to repeat on redelivery.
pub struct QueueReconciler {
    prober: RemoteProber,
    executor: MutationExecutor,
    annotator: IdentityAnnotator,
    store: Arc<dyn RecordStore>,
}

impl QueueReconciler {
    /// Build a reconciler that waits out deletion cooldowns on the tokio timer.
    pub fn new(
        service: Arc<dyn QueueService>,
        store: Arc<dyn RecordStore>,
        config: &ReconcileConfig,
    ) -> Self {
        Self::with_sleeper(service, store, config, Arc::new(TokioSleeper))
    }

    pub fn with_sleeper(
        service: Arc<dyn QueueService>,
        store: Arc<dyn RecordStore>,
        config: &ReconcileConfig,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            prober: RemoteProber::new(Arc::clone(&service)),
            executor: MutationExecutor::new(service, config, sleeper),
            annotator: IdentityAnnotator::from_config(config),
            store,
        }
    }

    /// Converge the external queue to `record`, or delete it.
    ///
    /// On success the operator-owned annotations are persisted (except after
    /// a deletion). On failure nothing is persisted and the call is safe to
    /// retry from scratch.
    #[instrument(skip(self, record), fields(record = %record.key(), queue = %record.queue_name()))]
    pub async fn reconcile(&self, record: &QueueRecord, is_deletion: bool) -> Result<ReconcileOutcome> {
        let name = record.queue_name();

        if is_deletion {
            self.executor.delete(name).await?;
            return Ok(ReconcileOutcome::Deleted);
        }

        let desired = build_attributes(&record.spec);

        let (outcome, converged) = if self.prober.exists(name).await {
            self.converge_existing(name, &desired).await?
        } else {
            match self.executor.create(name, &desired).await? {
                CreateOutcome::Created(locator) => (ReconcileOutcome::Created, Converged::Mutated(locator)),
                CreateOutcome::AlreadyExists => self.converge_existing(name, &desired).await?,
            }
        };

        let (handle, snapshot) = match converged {
            Converged::Observed(handle, snapshot) => (handle, snapshot),
            Converged::Mutated(locator) => self.observe(&locator).await?,
        };

        let annotated = self.annotator.annotate(record, &handle, &snapshot);
        self.store.persist(&annotated).await?;

        info!(outcome = %outcome, arn = %handle.arn, "queue reconciled");
        Ok(outcome)
    }

    /// Fetch, compare and update an existing queue.
    async fn converge_existing(
        &self,
        name: &str,
        desired: &AttributeMap,
    ) -> Result<(ReconcileOutcome, Converged)> {
        let (handle, actual) = self
            .prober
            .fetch(name)
            .await?
            .ok_or_else(|| OperatorError::NotFound(format!("queue {name} vanished during reconciliation")))?;

        if has_changed(desired, &actual)? {
            let locator = self.executor.update(name, desired).await?;
            Ok((ReconcileOutcome::Updated, Converged::Mutated(locator)))
        } else {
            Ok((ReconcileOutcome::Unchanged, Converged::Observed(handle, actual)))
        }
    }

    /// Read back identity (and the snapshot, if annotated) after a mutation.
    async fn observe(&self, locator: &QueueLocator) -> Result<(QueueHandle, AttributeMap)> {
        let selection = RemoteProber::selection(self.annotator.includes_snapshot());
        self.prober.fetch_at(locator, &selection).await
    }
}
