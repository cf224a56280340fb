//! Writes queue identifiers onto the record's annotations

use std::collections::BTreeMap;

use sqs_operator_domain::constants::attribute_names::{QUEUE_ARN, QUEUE_URL};
use sqs_operator_domain::constants::VOLATILE_ATTRIBUTE_PREFIX;
use sqs_operator_domain::{AttributeMap, QueueHandle, QueueRecord, ReconcileConfig};

/// Maps queue identity and observed attributes to `<prefix>/<Attribute>`
/// annotation keys.
#[derive(Debug, Clone)]
pub struct IdentityAnnotator {
    prefix: String,
    include_snapshot: bool,
}

impl IdentityAnnotator {
    pub fn new(prefix: impl Into<String>, include_snapshot: bool) -> Self {
        Self { prefix: prefix.into(), include_snapshot }
    }

    pub fn from_config(config: &ReconcileConfig) -> Self {
        Self::new(config.annotation_prefix.trim(), config.annotate_snapshot)
    }

    pub fn annotation_key(&self, attribute: &str) -> String {
        format!("{}/{attribute}", self.prefix)
    }

    /// Whether the full observed snapshot is written
    pub fn includes_snapshot(&self) -> bool {
        self.include_snapshot
    }

    /// Working copy of `record` whose annotations are exactly the keys this
    /// annotator owns: the locator, the identifier and, when enabled, every
    /// stable snapshot attribute.
    ///
    /// Annotations outside the prefix are dropped from the copy so that
    /// persisting it never rewrites values owned by someone else. Live
    /// message counters are skipped; identifiers come from `handle` and win
    /// over snapshot values.
    pub fn annotate(&self, record: &QueueRecord, handle: &QueueHandle, snapshot: &AttributeMap) -> QueueRecord {
        let mut owned = BTreeMap::new();
        if self.include_snapshot {
            for (attribute, value) in snapshot {
                if !attribute.starts_with(VOLATILE_ATTRIBUTE_PREFIX) {
                    owned.insert(self.annotation_key(attribute), value.clone());
                }
            }
        }
        owned.insert(self.annotation_key(QUEUE_URL), handle.locator.as_str().to_string());
        owned.insert(self.annotation_key(QUEUE_ARN), handle.arn.clone());

        record.clone().with_annotations(owned)
    }
}
