//! Configuration management

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ANNOTATION_PREFIX, DEFAULT_COOLDOWN_MAX_ATTEMPTS, DEFAULT_COOLDOWN_SECS,
    DEFAULT_ERROR_REQUEUE_SECS, DEFAULT_RECONCILE_TIMEOUT_SECS, DEFAULT_REQUEUE_SECS,
};
use crate::{OperatorError, Result};

/// Operator configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorConfig {
    pub aws: AwsConfig,
    pub reconcile: ReconcileConfig,
    pub controller: ControllerConfig,
    pub logging: LoggingConfig,
}

/// Queue service connection settings
///
/// Credentials are never configured here; the default AWS provider chain
/// supplies them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsConfig {
    pub region: Option<String>,
    /// Custom endpoint (LocalStack, ElasticMQ)
    pub endpoint_url: Option<String>,
}

/// Reconciliation engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    pub annotation_prefix: String,
    /// Write every observed attribute, not only the identifiers
    pub annotate_snapshot: bool,
    pub cooldown_delay_secs: u64,
    /// Creation attempts, including the first, while the name is cooling down
    pub cooldown_max_attempts: u32,
}

/// Event-delivery settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Watch a single namespace; all namespaces when unset
    pub namespace: Option<String>,
    pub timeout_secs: u64,
    pub requeue_secs: u64,
    pub error_requeue_secs: u64,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info,sqs_operator_core=debug`
    pub filter: String,
    pub json: bool,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            annotation_prefix: DEFAULT_ANNOTATION_PREFIX.to_string(),
            annotate_snapshot: true,
            cooldown_delay_secs: DEFAULT_COOLDOWN_SECS,
            cooldown_max_attempts: DEFAULT_COOLDOWN_MAX_ATTEMPTS,
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            namespace: None,
            timeout_secs: DEFAULT_RECONCILE_TIMEOUT_SECS,
            requeue_secs: DEFAULT_REQUEUE_SECS,
            error_requeue_secs: DEFAULT_ERROR_REQUEUE_SECS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: "info".to_string(), json: false }
    }
}

impl ReconcileConfig {
    pub fn cooldown_delay(&self) -> Duration {
        Duration::from_secs(self.cooldown_delay_secs)
    }
}

impl ControllerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn requeue(&self) -> Duration {
        Duration::from_secs(self.requeue_secs)
    }

    pub fn error_requeue(&self) -> Duration {
        Duration::from_secs(self.error_requeue_secs)
    }
}

impl OperatorConfig {
    /// Reject settings the engine cannot run with.
    ///
    /// # Errors
    /// Returns `OperatorError::Config` naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        let prefix = self.reconcile.annotation_prefix.trim();
        if prefix.is_empty() || prefix.contains('/') {
            return Err(OperatorError::Config(format!(
                "annotation prefix must be a non-empty name without '/': {:?}",
                self.reconcile.annotation_prefix
            )));
        }
        if self.reconcile.cooldown_max_attempts == 0 {
            return Err(OperatorError::Config(
                "cooldown_max_attempts must be greater than 0".to_string(),
            ));
        }
        if self.controller.timeout_secs == 0 {
            return Err(OperatorError::Config("timeout_secs must be greater than 0".to_string()));
        }
        Ok(())
    }
}
