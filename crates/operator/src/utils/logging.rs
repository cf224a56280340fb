//! Subscriber setup and structured reconcile logs
//!
//! Event names (`reconcile_success`, `reconcile_failure`) are stable.

use sqs_operator_core::ReconcileOutcome;
use sqs_operator_domain::{LoggingConfig, OperatorError, QueueRecord};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter. JSON output is
/// meant for log shippers; the default is human-readable text.
///
/// # Errors
/// Fails when the filter directive cannot be parsed or a subscriber is
/// already installed.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    if config.json {
        registry.with(fmt::layer().json().with_current_span(true)).try_init()?;
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()?;
    }
    Ok(())
}

fn build_filter(config: &LoggingConfig) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(&config.filter)?),
    }
}

/// Log a completed reconciliation with structured fields.
#[inline]
pub fn log_reconcile_outcome(record: &QueueRecord, outcome: ReconcileOutcome) {
    info!(
        record = %record.key(),
        queue = record.queue_name(),
        outcome = outcome.as_str(),
        "reconcile_success"
    );
}

/// Log a failed reconciliation. `error_kind` is the stable error label.
#[inline]
pub fn log_reconcile_failure(resource: &str, error: &OperatorError) {
    warn!(record = resource, error_kind = error.label(), error = %error, "reconcile_failure");
}
