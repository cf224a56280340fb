//! Conversions from external infrastructure errors into domain errors.

use std::error::Error as StdError;
use std::fmt;

use aws_sdk_sqs::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use kube::Error as KubeError;
use sqs_operator_domain::OperatorError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub OperatorError);

impl From<InfraError> for OperatorError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<OperatorError> for InfraError {
    fn from(value: OperatorError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoOperatorError {
    fn into_operator(self) -> OperatorError;
}

/* -------------------------------------------------------------------------- */
/* aws_sdk_sqs SdkError → OperatorError */
/* -------------------------------------------------------------------------- */

/// Error codes the queue service uses for a missing queue. The second form is
/// the legacy query-protocol code, still reported through the
/// `x-amzn-query-error` header.
const QUEUE_MISSING_CODES: [&str; 2] = ["QueueDoesNotExist", "AWS.SimpleQueueService.NonExistentQueue"];
const QUEUE_DELETED_RECENTLY_CODES: [&str; 2] =
    ["QueueDeletedRecently", "AWS.SimpleQueueService.QueueDeletedRecently"];
const QUEUE_NAME_TAKEN_CODES: [&str; 2] = ["QueueNameExists", "QueueAlreadyExists"];

/// Map a service error code onto the domain taxonomy.
///
/// Unknown codes, and failures without a code (timeouts, dispatch and
/// response errors), become `OperatorError::Service` with `message` intact.
pub fn classify_service_error(code: Option<&str>, message: String) -> OperatorError {
    match code {
        Some(code) if QUEUE_MISSING_CODES.contains(&code) => OperatorError::NotFound(message),
        Some(code) if QUEUE_DELETED_RECENTLY_CODES.contains(&code) => {
            OperatorError::recently_deleted(message)
        }
        Some(code) if QUEUE_NAME_TAKEN_CODES.contains(&code) => OperatorError::already_exists(message),
        _ => OperatorError::Service(message),
    }
}

impl<E, R> IntoOperatorError for SdkError<E, R>
where
    E: ProvideErrorMetadata + StdError + Send + Sync + 'static,
    R: fmt::Debug + Send + Sync + 'static,
{
    fn into_operator(self) -> OperatorError {
        let code = self.code().map(str::to_owned);
        let message = DisplayErrorContext(&self).to_string();
        classify_service_error(code.as_deref(), message)
    }
}

impl<E, R> From<SdkError<E, R>> for InfraError
where
    E: ProvideErrorMetadata + StdError + Send + Sync + 'static,
    R: fmt::Debug + Send + Sync + 'static,
{
    fn from(value: SdkError<E, R>) -> Self {
        InfraError(value.into_operator())
    }
}

/* -------------------------------------------------------------------------- */
/* kube::Error → OperatorError */
/* -------------------------------------------------------------------------- */

impl IntoOperatorError for KubeError {
    fn into_operator(self) -> OperatorError {
        match self {
            KubeError::Api(response) => OperatorError::RecordStore(format!(
                "{} ({}): {}",
                response.reason, response.code, response.message
            )),
            other => OperatorError::RecordStore(other.to_string()),
        }
    }
}

impl From<KubeError> for InfraError {
    fn from(value: KubeError) -> Self {
        InfraError(value.into_operator())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
