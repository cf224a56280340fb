//! Queue model types
//!
//! The spec types mirror the custom resource's `spec` block field for field;
//! the record wraps the spec together with the object identity and the
//! annotation map the operator writes.

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Flat attribute-name → value map, as exchanged with the queue service.
///
/// Ordered so that comparisons, logs and create/update requests are
/// deterministic.
pub type AttributeMap = BTreeMap<String, String>;

/// Desired queue configuration declared by the user
///
/// Optional timing attributes are numeric strings; `None` and `""` both mean
/// "leave the service default alone".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct SqsQueueSpec {
    /// Queue name; the stable identity key on the service side
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "int_or_string::optional")]
    #[cfg_attr(feature = "schema", schemars(schema_with = "int_or_string::schema"))]
    pub visibility_timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "int_or_string::optional")]
    #[cfg_attr(feature = "schema", schemars(schema_with = "int_or_string::schema"))]
    pub maximum_message_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "int_or_string::optional")]
    #[cfg_attr(feature = "schema", schemars(schema_with = "int_or_string::schema"))]
    pub message_retention_period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "int_or_string::optional")]
    #[cfg_attr(feature = "schema", schemars(schema_with = "int_or_string::schema"))]
    pub delay_seconds: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "int_or_string::optional")]
    #[cfg_attr(feature = "schema", schemars(schema_with = "int_or_string::schema"))]
    pub receive_message_wait_time_seconds: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redrive_policy: Option<RedrivePolicy>,
    #[serde(default)]
    pub fifo_queue: bool,
    /// Legacy schema-agnostic mode: raw service attributes passed through
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

/// Dead-letter configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct RedrivePolicy {
    #[serde(default, deserialize_with = "int_or_string::required")]
    #[cfg_attr(feature = "schema", schemars(schema_with = "int_or_string::schema"))]
    pub max_receive_count: String,
    #[serde(default)]
    pub dead_letter_target_arn: String,
}

/// Numeric attributes may be written as YAML strings or bare integers.
mod int_or_string {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    impl From<Raw> for String {
        fn from(raw: Raw) -> Self {
            match raw {
                Raw::Text(text) => text,
                Raw::Signed(n) => n.to_string(),
                Raw::Unsigned(n) => n.to_string(),
            }
        }
    }

    pub fn optional<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(Option::<Raw>::deserialize(deserializer)?.map(String::from))
    }

    pub fn required<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Raw::deserialize(deserializer).map(String::from)
    }

    #[cfg(feature = "schema")]
    pub fn schema(_: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        let mut schema = schemars::schema::SchemaObject::default();
        schema
            .extensions
            .insert("x-kubernetes-int-or-string".to_string(), serde_json::Value::Bool(true));
        schemars::schema::Schema::Object(schema)
    }
}

impl SqsQueueSpec {
    /// Spec with only a name; every optional attribute left unset
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }
}

/// The resource record the operator reconciles
///
/// Owned by the record store. The engine reads `spec` and only ever writes
/// `annotations`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueRecord {
    /// Object name in the record store
    pub name: String,
    pub namespace: Option<String>,
    pub spec: SqsQueueSpec,
    pub annotations: BTreeMap<String, String>,
}

impl QueueRecord {
    pub fn new(name: impl Into<String>, spec: SqsQueueSpec) -> Self {
        Self { name: name.into(), namespace: None, spec, annotations: BTreeMap::new() }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_annotations(mut self, annotations: BTreeMap<String, String>) -> Self {
        self.annotations = annotations;
        self
    }

    /// External queue name
    pub fn queue_name(&self) -> &str {
        &self.spec.name
    }

    /// `namespace/name` key used in logs
    pub fn key(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}/{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// Service-assigned address of an existing queue (the queue URL)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueueLocator(String);

impl QueueLocator {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueueLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for QueueLocator {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Locator plus globally unique identifier (ARN) of a live queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueHandle {
    pub locator: QueueLocator,
    pub arn: String,
}

/// Which attributes to request from the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeSelection {
    All,
    Named(Vec<String>),
}
