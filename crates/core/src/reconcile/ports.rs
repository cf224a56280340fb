//! Port interfaces for queue reconciliation
//!
//! Every operation must be safe to repeat: event delivery is at-least-once
//! and idempotency, not locking, keeps repeated deliveries correct.

use async_trait::async_trait;
use sqs_operator_domain::{AttributeMap, AttributeSelection, QueueLocator, QueueRecord, Result};

/// The external queueing service
///
/// Implementations are stateless and shared across concurrent
/// reconciliations of different queues.
#[async_trait]
pub trait QueueService: Send + Sync {
    /// Resolve a queue name to its locator.
    ///
    /// Fails with `OperatorError::NotFound` when no such queue exists.
    async fn lookup_by_name(&self, name: &str) -> Result<QueueLocator>;

    /// Create a queue with exactly the given attributes.
    ///
    /// Fails with `OperatorError::Conflict` when the name was deleted too
    /// recently or is already taken.
    async fn create(&self, name: &str, attributes: &AttributeMap) -> Result<QueueLocator>;

    /// Read the current attributes of a queue
    async fn get_attributes(
        &self,
        locator: &QueueLocator,
        selection: &AttributeSelection,
    ) -> Result<AttributeMap>;

    /// Overwrite the given attributes; attributes not named are left alone
    async fn set_attributes(&self, locator: &QueueLocator, attributes: &AttributeMap) -> Result<()>;

    /// Delete a queue by locator
    async fn delete(&self, locator: &QueueLocator) -> Result<()>;
}

/// Persistence for the resource record's annotations
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist the record's annotation map.
    ///
    /// Must be idempotent and cheap when nothing changed.
    async fn persist(&self, record: &QueueRecord) -> Result<()>;
}
