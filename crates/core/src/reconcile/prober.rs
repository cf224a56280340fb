//! Read-only lookups against the queue service

use std::sync::Arc;

use sqs_operator_domain::constants::attribute_names::{QUEUE_ARN, QUEUE_URL};
use sqs_operator_domain::{
    AttributeMap, AttributeSelection, OperatorError, QueueHandle, QueueLocator, Result,
};
use tracing::{debug, warn};

use super::ports::QueueService;

/// Answers "does the queue exist" and "what does it look like now"
pub struct RemoteProber {
    service: Arc<dyn QueueService>,
}

impl RemoteProber {
    pub fn new(service: Arc<dyn QueueService>) -> Self {
        Self { service }
    }

    /// Whether a queue with this name exists.
    ///
    /// Only a not-found answer means `false`. Any other failure is assumed
    /// to mean the queue exists, so that a flaky lookup never causes a
    /// duplicate create; the create path re-verifies through its conflict
    /// handling.
    pub async fn exists(&self, name: &str) -> bool {
        match self.service.lookup_by_name(name).await {
            Ok(_) => true,
            Err(err) if err.is_not_found() => false,
            Err(err) => {
                warn!(queue = %name, error = %err, error_kind = err.label(), "existence check failed, assuming queue exists");
                true
            }
        }
    }

    /// Full attribute snapshot of the named queue, or `None` if it is absent.
    ///
    /// The snapshot also carries `QueueUrl`.
    pub async fn fetch(&self, name: &str) -> Result<Option<(QueueHandle, AttributeMap)>> {
        let locator = match self.service.lookup_by_name(name).await {
            Ok(locator) => locator,
            Err(err) if err.is_not_found() => {
                debug!(queue = %name, "queue not found");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        self.fetch_at(&locator, &Self::selection(true)).await.map(Some)
    }

    /// Snapshot of the queue at a locator a mutation just returned.
    ///
    /// Skips the name lookup, which may still miss a freshly created queue.
    /// The snapshot also carries `QueueUrl`.
    pub async fn fetch_at(
        &self,
        locator: &QueueLocator,
        selection: &AttributeSelection,
    ) -> Result<(QueueHandle, AttributeMap)> {
        let mut snapshot = self.service.get_attributes(locator, selection).await?;
        let handle = handle_from(locator, &snapshot)?;
        snapshot.insert(QUEUE_URL.to_string(), locator.as_str().to_string());
        Ok((handle, snapshot))
    }

    /// Every attribute, or only the identifier.
    pub fn selection(full: bool) -> AttributeSelection {
        if full {
            AttributeSelection::All
        } else {
            AttributeSelection::Named(vec![QUEUE_ARN.to_string()])
        }
    }
}

fn handle_from(locator: &QueueLocator, snapshot: &AttributeMap) -> Result<QueueHandle> {
    let arn = snapshot.get(QUEUE_ARN).filter(|arn| !arn.is_empty()).ok_or_else(|| {
        OperatorError::Internal(format!("queue {locator} reported no {QUEUE_ARN}"))
    })?;
    Ok(QueueHandle { locator: locator.clone(), arn: arn.clone() })
}
