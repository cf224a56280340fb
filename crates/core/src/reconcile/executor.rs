//! Queue mutations: create with cooldown retry, update, delete

use std::sync::Arc;
use std::time::Duration;

use sqs_operator_common::{RetryConfig, RetryDecision, RetryExecutor, RetryPolicy, Sleeper};
use sqs_operator_domain::{
    AttributeMap, ConflictReason, OperatorError, QueueLocator, ReconcileConfig, Result,
};
use tracing::{debug, info};

use super::ports::QueueService;

/// Retries creation only while the name is cooling down after a deletion
#[derive(Debug, Clone)]
pub struct CooldownPolicy {
    delay: Duration,
}

impl CooldownPolicy {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl RetryPolicy<OperatorError> for CooldownPolicy {
    fn should_retry(&self, error: &OperatorError, attempt: u32) -> RetryDecision {
        if error.is_conflict(ConflictReason::RecentlyDeleted) {
            info!(
                attempt = attempt + 1,
                delay_secs = self.delay.as_secs(),
                "queue name is cooling down after a deletion"
            );
            RetryDecision::RetryAfter(self.delay)
        } else {
            RetryDecision::Stop
        }
    }
}

/// Result of a create attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(QueueLocator),
    /// Another creator won the race; converge through the update path
    AlreadyExists,
}

/// Issues create, update and delete calls
pub struct MutationExecutor {
    service: Arc<dyn QueueService>,
    cooldown: RetryExecutor<CooldownPolicy>,
}

impl MutationExecutor {
    pub fn new(
        service: Arc<dyn QueueService>,
        config: &ReconcileConfig,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        let cooldown = RetryExecutor::with_sleeper(
            RetryConfig::new(config.cooldown_max_attempts),
            CooldownPolicy::new(config.cooldown_delay()),
            sleeper,
        );
        Self { service, cooldown }
    }

    /// Create the queue, waiting out a deletion cooldown.
    ///
    /// # Errors
    /// The last `RecentlyDeleted` conflict once attempts are exhausted, or
    /// any other service error unchanged.
    pub async fn create(&self, name: &str, attributes: &AttributeMap) -> Result<CreateOutcome> {
        let result = self.cooldown.execute(|| self.service.create(name, attributes)).await;

        match result.map_err(|e| e.into_source()) {
            Ok(locator) => {
                info!(queue = %name, locator = %locator, "queue created");
                Ok(CreateOutcome::Created(locator))
            }
            Err(err) if err.is_conflict(ConflictReason::AlreadyExists) => {
                info!(queue = %name, "queue already exists, converging existing queue");
                Ok(CreateOutcome::AlreadyExists)
            }
            Err(err) => Err(err),
        }
    }

    /// Overwrite the desired attributes on the named queue.
    ///
    /// Attributes absent from `attributes` are left as they are.
    pub async fn update(&self, name: &str, attributes: &AttributeMap) -> Result<QueueLocator> {
        let locator = self.service.lookup_by_name(name).await?;
        self.service.set_attributes(&locator, attributes).await?;
        info!(queue = %name, attributes = attributes.len(), "queue attributes updated");
        Ok(locator)
    }

    /// Delete the named queue; `false` when it was already gone.
    pub async fn delete(&self, name: &str) -> Result<bool> {
        let locator = match self.service.lookup_by_name(name).await {
            Ok(locator) => locator,
            Err(err) if err.is_not_found() => {
                debug!(queue = %name, "queue already absent, nothing to delete");
                return Ok(false);
            }
            Err(err) => return Err(err),
        };

        match self.service.delete(&locator).await {
            Ok(()) => {
                info!(queue = %name, locator = %locator, "queue deleted");
                Ok(true)
            }
            Err(err) if err.is_not_found() => {
                debug!(queue = %name, "queue disappeared before delete");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_policy_retries_only_recently_deleted() {
        let policy = CooldownPolicy::new(Duration::from_secs(60));

        assert_eq!(
            policy.should_retry(&OperatorError::recently_deleted("wait"), 0),
            RetryDecision::RetryAfter(Duration::from_secs(60))
        );
        assert_eq!(policy.should_retry(&OperatorError::already_exists("taken"), 0), RetryDecision::Stop);
        assert_eq!(policy.should_retry(&OperatorError::Service("boom".into()), 0), RetryDecision::Stop);
    }
}
