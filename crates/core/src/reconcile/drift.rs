//! Drift detection between desired and observed attributes
//!
//! Only keys present in the desired set are compared. Plain scalars are
//! compared textually; `RedrivePolicy` is compared as decoded JSON.

use serde_json::Value;
use sqs_operator_domain::constants::attribute_names::REDRIVE_POLICY;
use sqs_operator_domain::constants::SCALAR_COMPARISON_KEYS;
use sqs_operator_domain::{AttributeMap, AttributeSide, OperatorError, Result};
use tracing::debug;

use super::codec::strip_whitespace;

/// Whether the observed queue differs from the desired attributes.
///
/// Returns on the first mismatch. A missing observed value counts as a
/// mismatch.
///
/// # Errors
/// Returns `OperatorError::Decode` when either redrive policy is not valid
/// JSON; a malformed value is never treated as "unchanged".
pub fn has_changed(desired: &AttributeMap, actual: &AttributeMap) -> Result<bool> {
    for key in SCALAR_COMPARISON_KEYS {
        let Some(want) = desired.get(key) else {
            continue;
        };
        let have = actual.get(key);
        if have != Some(want) {
            debug!(attribute = key, desired = %want, observed = ?have, "scalar attribute drifted");
            return Ok(true);
        }
    }

    if let Some(want) = desired.get(REDRIVE_POLICY) {
        let Some(have) = actual.get(REDRIVE_POLICY) else {
            debug!(attribute = REDRIVE_POLICY, "redrive policy missing on queue");
            return Ok(true);
        };
        if !json_equivalent(REDRIVE_POLICY, want, have)? {
            debug!(attribute = REDRIVE_POLICY, desired = %want, observed = %have, "redrive policy drifted");
            return Ok(true);
        }
    }

    Ok(false)
}

/// Compare two JSON documents structurally.
///
/// Key order and incidental whitespace are insignificant.
///
/// # Errors
/// Returns `OperatorError::Decode` naming the side that failed to parse.
pub fn json_equivalent(attribute: &str, desired: &str, observed: &str) -> Result<bool> {
    let desired = decode(attribute, AttributeSide::Desired, desired)?;
    let observed = decode(attribute, AttributeSide::Observed, observed)?;
    Ok(desired == observed)
}

fn decode(attribute: &str, side: AttributeSide, raw: &str) -> Result<Value> {
    serde_json::from_str(&strip_whitespace(raw)).map_err(|e| OperatorError::Decode {
        side,
        attribute: attribute.to_string(),
        message: e.to_string(),
    })
}
