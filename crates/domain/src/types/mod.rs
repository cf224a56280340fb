//! Domain types
//!
//! - [`queue`]: desired queue spec, the resource record, attribute maps and
//!   the external queue handle

pub mod queue;

pub use queue::{
    AttributeMap, AttributeSelection, QueueHandle, QueueLocator, QueueRecord, RedrivePolicy,
    SqsQueueSpec,
};
