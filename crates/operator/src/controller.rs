//! Watch loop driving `SQSQueue` resources through the reconciler
//!
//! A finalizer guards every resource so the remote queue is deleted before
//! the object leaves the API server.

use std::sync::Arc;

use futures::StreamExt;
use kube::api::Api;
use kube::runtime::controller::{Action, Controller};
use kube::runtime::finalizer::{self, finalizer, Event as FinalizerEvent};
use kube::runtime::watcher;
use kube::ResourceExt;
use sqs_operator_domain::constants::FINALIZER_NAME;
use sqs_operator_domain::{OperatorError, QueueRecord};
use sqs_operator_infra::{InfraError, SQSQueue};
use tracing::{debug, info, warn};

use crate::context::OperatorContext;
use crate::utils::logging::{log_reconcile_failure, log_reconcile_outcome};

/// Run the controller until a termination signal arrives.
pub async fn run(ctx: Arc<OperatorContext>) {
    let api: Api<SQSQueue> = match ctx.config.controller.namespace.as_deref() {
        Some(namespace) => Api::namespaced(ctx.client.clone(), namespace),
        None => Api::all(ctx.client.clone()),
    };

    info!(finalizer = FINALIZER_NAME, "starting SQSQueue controller");

    Controller::new(api, watcher::Config::default())
        .shutdown_on_signal()
        .run(reconcile, error_policy, ctx)
        .for_each(|result| async move {
            match result {
                Ok((object, action)) => debug!(object = %object, ?action, "reconciled"),
                Err(err) => warn!(error = %err, "controller stream error"),
            }
        })
        .await;

    info!("SQSQueue controller stopped");
}

async fn reconcile(
    resource: Arc<SQSQueue>,
    ctx: Arc<OperatorContext>,
) -> Result<Action, OperatorError> {
    let namespace = resource.namespace().ok_or_else(|| {
        OperatorError::RecordStore(format!("{} has no namespace", resource.name_any()))
    })?;
    let api: Api<SQSQueue> = Api::namespaced(ctx.client.clone(), &namespace);

    finalizer(&api, FINALIZER_NAME, resource, |event| async move {
        match event {
            FinalizerEvent::Apply(resource) => apply(&resource, false, &ctx).await,
            FinalizerEvent::Cleanup(resource) => apply(&resource, true, &ctx).await,
        }
    })
    .await
    .map_err(from_finalizer_error)
}

async fn apply(
    resource: &SQSQueue,
    is_deletion: bool,
    ctx: &OperatorContext,
) -> Result<Action, OperatorError> {
    let record = QueueRecord::from(resource);
    let timeout = ctx.config.controller.timeout();

    let outcome = tokio::time::timeout(timeout, ctx.reconciler.reconcile(&record, is_deletion))
        .await
        .map_err(|_| OperatorError::Timeout(timeout))??;

    log_reconcile_outcome(&record, outcome);
    Ok(next_action(is_deletion, ctx))
}

fn next_action(is_deletion: bool, ctx: &OperatorContext) -> Action {
    if is_deletion {
        Action::await_change()
    } else {
        Action::requeue(ctx.config.controller.requeue())
    }
}

fn error_policy(resource: Arc<SQSQueue>, error: &OperatorError, ctx: Arc<OperatorContext>) -> Action {
    log_reconcile_failure(&resource.name_any(), error);
    Action::requeue(ctx.config.controller.error_requeue())
}

/// Unwrap reconcile failures and translate finalizer bookkeeping errors.
pub fn from_finalizer_error(err: finalizer::Error<OperatorError>) -> OperatorError {
    match err {
        finalizer::Error::ApplyFailed(inner) | finalizer::Error::CleanupFailed(inner) => inner,
        finalizer::Error::AddFinalizer(inner) | finalizer::Error::RemoveFinalizer(inner) => {
            InfraError::from(inner).into()
        }
        other => OperatorError::Internal(other.to_string()),
    }
}
