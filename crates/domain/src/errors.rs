//! Error types used throughout the operator

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Why the queue service refused to create a queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictReason {
    /// A queue with the same name was deleted less than the cooldown ago
    RecentlyDeleted,
    /// A queue with the same name already exists
    AlreadyExists,
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RecentlyDeleted => f.write_str("recently deleted"),
            Self::AlreadyExists => f.write_str("already exists"),
        }
    }
}

/// Which side of a drift comparison held a malformed value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeSide {
    Desired,
    Observed,
}

impl fmt::Display for AttributeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Desired => f.write_str("desired"),
            Self::Observed => f.write_str("observed"),
        }
    }
}

/// Main error type for the operator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperatorError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict ({reason}): {message}")]
    Conflict { reason: ConflictReason, message: String },

    #[error("Malformed {side} value for attribute {attribute}: {message}")]
    Decode { side: AttributeSide, attribute: String, message: String },

    #[error("Queue service error: {0}")]
    Service(String),

    #[error("Record store error: {0}")]
    RecordStore(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Reconciliation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl OperatorError {
    /// Shorthand for a `RecentlyDeleted` conflict
    pub fn recently_deleted(message: impl Into<String>) -> Self {
        Self::Conflict { reason: ConflictReason::RecentlyDeleted, message: message.into() }
    }

    /// Shorthand for an `AlreadyExists` conflict
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::Conflict { reason: ConflictReason::AlreadyExists, message: message.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether this is a create conflict with the given reason
    pub fn is_conflict(&self, expected: ConflictReason) -> bool {
        matches!(self, Self::Conflict { reason, .. } if *reason == expected)
    }

    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Conflict { reason: ConflictReason::RecentlyDeleted, .. } => "recently_deleted",
            Self::Conflict { reason: ConflictReason::AlreadyExists, .. } => "already_exists",
            Self::Decode { .. } => "decode",
            Self::Service(_) => "service",
            Self::RecordStore(_) => "record_store",
            Self::Config(_) => "config",
            Self::Timeout(_) => "timeout",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for operator operations
pub type Result<T> = std::result::Result<T, OperatorError>;
