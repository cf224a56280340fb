//! Attribute codec
//!
//! Converts a desired queue spec into the flat attribute map the queue
//! service accepts. Only attributes the spec explicitly sets are emitted: an
//! explicit empty value would reset the attribute on the service side.

use serde::Serialize;
use sqs_operator_domain::constants::attribute_names::{
    DELAY_SECONDS, FIFO_QUEUE, MAXIMUM_MESSAGE_SIZE, MESSAGE_RETENTION_PERIOD,
    RECEIVE_MESSAGE_WAIT_TIME_SECONDS, REDRIVE_POLICY, VISIBILITY_TIMEOUT,
};
use sqs_operator_domain::{AttributeMap, RedrivePolicy, SqsQueueSpec};

/// Wire shape of the `RedrivePolicy` attribute, field order preserved
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RedrivePolicyWire<'a> {
    max_receive_count: &'a str,
    dead_letter_target_arn: &'a str,
}

/// Remove spaces and newlines.
pub fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|c| *c != ' ' && *c != '\n').collect()
}

/// Build the canonical attribute set for a spec.
///
/// Entries from the legacy `attributes` map are copied first; structured
/// fields then overwrite any entry naming the same attribute.
pub fn build_attributes(spec: &SqsQueueSpec) -> AttributeMap {
    let mut attributes = AttributeMap::new();

    for (name, value) in &spec.attributes {
        insert_non_empty(&mut attributes, name, Some(value));
    }

    let scalars = [
        (VISIBILITY_TIMEOUT, &spec.visibility_timeout),
        (MAXIMUM_MESSAGE_SIZE, &spec.maximum_message_size),
        (MESSAGE_RETENTION_PERIOD, &spec.message_retention_period),
        (DELAY_SECONDS, &spec.delay_seconds),
        (RECEIVE_MESSAGE_WAIT_TIME_SECONDS, &spec.receive_message_wait_time_seconds),
    ];
    for (name, value) in scalars {
        insert_non_empty(&mut attributes, name, value.as_ref());
    }

    if let Some(encoded) = spec.redrive_policy.as_ref().and_then(encode_redrive_policy) {
        attributes.insert(REDRIVE_POLICY.to_string(), encoded);
    }

    if spec.fifo_queue {
        attributes.insert(FIFO_QUEUE.to_string(), "true".to_string());
    }

    attributes
}

/// JSON-encode a redrive policy, or `None` when `maxReceiveCount` is unset.
pub fn encode_redrive_policy(policy: &RedrivePolicy) -> Option<String> {
    let max_receive_count = strip_whitespace(&policy.max_receive_count);
    if max_receive_count.is_empty() {
        return None;
    }
    let dead_letter_target_arn = strip_whitespace(&policy.dead_letter_target_arn);

    serde_json::to_string(&RedrivePolicyWire {
        max_receive_count: &max_receive_count,
        dead_letter_target_arn: &dead_letter_target_arn,
    })
    .ok()
}

fn insert_non_empty(attributes: &mut AttributeMap, name: &str, value: Option<&String>) {
    let Some(value) = value.map(|v| strip_whitespace(v)) else {
        return;
    };
    if !value.is_empty() {
        attributes.insert(name.to_string(), value);
    }
}
