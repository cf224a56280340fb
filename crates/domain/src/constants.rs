//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! operator.

// Annotation and finalizer names
pub const DEFAULT_ANNOTATION_PREFIX: &str = "sqs.operator.k8s.io";
pub const FINALIZER_NAME: &str = "sqs.operator.k8s.io/queue-cleanup";

// Cooldown after a same-named queue was deleted
pub const DEFAULT_COOLDOWN_SECS: u64 = 60;
pub const DEFAULT_COOLDOWN_MAX_ATTEMPTS: u32 = 3;

// Controller timing
pub const DEFAULT_RECONCILE_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_REQUEUE_SECS: u64 = 300;
pub const DEFAULT_ERROR_REQUEUE_SECS: u64 = 15;

/// Attribute names understood by the queue service.
pub mod attribute_names {
    pub const VISIBILITY_TIMEOUT: &str = "VisibilityTimeout";
    pub const MAXIMUM_MESSAGE_SIZE: &str = "MaximumMessageSize";
    pub const MESSAGE_RETENTION_PERIOD: &str = "MessageRetentionPeriod";
    pub const DELAY_SECONDS: &str = "DelaySeconds";
    pub const RECEIVE_MESSAGE_WAIT_TIME_SECONDS: &str = "ReceiveMessageWaitTimeSeconds";
    pub const REDRIVE_POLICY: &str = "RedrivePolicy";
    pub const FIFO_QUEUE: &str = "FifoQueue";
    pub const QUEUE_ARN: &str = "QueueArn";
    /// Not a service attribute; the locator is folded into observed snapshots
    /// under this key.
    pub const QUEUE_URL: &str = "QueueUrl";
}

/// Prefix of the live message counters (`ApproximateNumberOfMessages` and
/// friends). They change without any configuration change and are never
/// annotated.
pub const VOLATILE_ATTRIBUTE_PREFIX: &str = "Approximate";

/// Plain scalar attributes compared textually by drift detection, in
/// comparison order.
pub const SCALAR_COMPARISON_KEYS: [&str; 5] = [
    attribute_names::VISIBILITY_TIMEOUT,
    attribute_names::MAXIMUM_MESSAGE_SIZE,
    attribute_names::MESSAGE_RETENTION_PERIOD,
    attribute_names::DELAY_SECONDS,
    attribute_names::RECEIVE_MESSAGE_WAIT_TIME_SECONDS,
];
