//! In-memory queue service and record store
//!
//! `InMemoryQueueService` behaves like a single-account queue service: names
//! are unique, creates of a taken name conflict, and deletes of an unknown
//! locator report not-found. Every call is logged for assertions.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use sqs_operator_core::{QueueService, RecordStore};
use sqs_operator_domain::{
    AttributeMap, AttributeSelection, OperatorError, QueueLocator, QueueRecord,
    Result as DomainResult,
};

const URL_PREFIX: &str = "https://sqs.us-east-1.amazonaws.com/000000000000/";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().expect("test mutex poisoned")
}

/// A single call made against the fake service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Lookup(String),
    Create(String, AttributeMap),
    GetAttributes(String),
    SetAttributes(String, AttributeMap),
    Delete(String),
}

#[derive(Default)]
struct State {
    queues: BTreeMap<String, AttributeMap>,
    calls: Vec<Call>,
    lookup_failures: VecDeque<OperatorError>,
    create_failures: VecDeque<OperatorError>,
}

/// In-memory mock for `QueueService`.
#[derive(Default, Clone)]
pub struct InMemoryQueueService {
    state: Arc<Mutex<State>>,
}

impl InMemoryQueueService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url_for(name: &str) -> String {
        format!("{URL_PREFIX}{name}")
    }

    pub fn arn_for(name: &str) -> String {
        format!("arn:aws:sqs:us-east-1:000000000000:{name}")
    }

    /// Seed an existing queue with the given attributes.
    pub fn with_queue(self, name: &str, attributes: &[(&str, &str)]) -> Self {
        let attributes =
            attributes.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        lock(&self.state).queues.insert(name.to_string(), stored(name, attributes));
        self
    }

    /// Make the next name lookup fail with `error`, whatever the state.
    pub fn fail_next_lookup(&self, error: OperatorError) {
        lock(&self.state).lookup_failures.push_back(error);
    }

    /// Make the next create calls fail, in order, before any real create.
    pub fn fail_next_creates(&self, errors: impl IntoIterator<Item = OperatorError>) {
        lock(&self.state).create_failures.extend(errors);
    }

    /// Change a live attribute as the service would, e.g. a message counter.
    pub fn set_live_attribute(&self, name: &str, attribute: &str, value: &str) {
        if let Some(attributes) = lock(&self.state).queues.get_mut(name) {
            attributes.insert(attribute.to_string(), value.to_string());
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        lock(&self.state).calls.clone()
    }

    pub fn create_calls(&self) -> Vec<(String, AttributeMap)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Create(name, attributes) => Some((name, attributes)),
                _ => None,
            })
            .collect()
    }

    pub fn lookup_calls(&self) -> usize {
        self.calls().iter().filter(|call| matches!(call, Call::Lookup(_))).count()
    }

    pub fn set_attribute_calls(&self) -> usize {
        self.calls().iter().filter(|call| matches!(call, Call::SetAttributes(..))).count()
    }

    pub fn delete_calls(&self) -> usize {
        self.calls().iter().filter(|call| matches!(call, Call::Delete(_))).count()
    }

    pub fn queue_count(&self) -> usize {
        lock(&self.state).queues.len()
    }

    pub fn attributes_of(&self, name: &str) -> Option<AttributeMap> {
        lock(&self.state).queues.get(name).cloned()
    }
}

fn stored(name: &str, mut attributes: AttributeMap) -> AttributeMap {
    attributes.insert("QueueArn".to_string(), InMemoryQueueService::arn_for(name));
    attributes.entry("ApproximateNumberOfMessages".to_string()).or_insert_with(|| "0".to_string());
    attributes
}

fn name_of(locator: &QueueLocator) -> String {
    locator.as_str().trim_start_matches(URL_PREFIX).to_string()
}

#[async_trait]
impl QueueService for InMemoryQueueService {
    async fn lookup_by_name(&self, name: &str) -> DomainResult<QueueLocator> {
        let mut state = lock(&self.state);
        state.calls.push(Call::Lookup(name.to_string()));
        if let Some(error) = state.lookup_failures.pop_front() {
            return Err(error);
        }
        if state.queues.contains_key(name) {
            Ok(QueueLocator::new(Self::url_for(name)))
        } else {
            Err(OperatorError::NotFound(format!("queue {name} does not exist")))
        }
    }

    async fn create(&self, name: &str, attributes: &AttributeMap) -> DomainResult<QueueLocator> {
        let mut state = lock(&self.state);
        state.calls.push(Call::Create(name.to_string(), attributes.clone()));
        if let Some(error) = state.create_failures.pop_front() {
            return Err(error);
        }
        if state.queues.contains_key(name) {
            return Err(OperatorError::already_exists(format!("queue {name} already exists")));
        }
        state.queues.insert(name.to_string(), stored(name, attributes.clone()));
        Ok(QueueLocator::new(Self::url_for(name)))
    }

    async fn get_attributes(
        &self,
        locator: &QueueLocator,
        selection: &AttributeSelection,
    ) -> DomainResult<AttributeMap> {
        let mut state = lock(&self.state);
        state.calls.push(Call::GetAttributes(locator.to_string()));
        let attributes = state
            .queues
            .get(&name_of(locator))
            .ok_or_else(|| OperatorError::NotFound(locator.to_string()))?;
        Ok(match selection {
            AttributeSelection::All => attributes.clone(),
            AttributeSelection::Named(names) => attributes
                .iter()
                .filter(|(key, _)| names.contains(key))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        })
    }

    async fn set_attributes(
        &self,
        locator: &QueueLocator,
        attributes: &AttributeMap,
    ) -> DomainResult<()> {
        let mut state = lock(&self.state);
        state.calls.push(Call::SetAttributes(locator.to_string(), attributes.clone()));
        let current = state
            .queues
            .get_mut(&name_of(locator))
            .ok_or_else(|| OperatorError::NotFound(locator.to_string()))?;
        current.extend(attributes.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }

    async fn delete(&self, locator: &QueueLocator) -> DomainResult<()> {
        let mut state = lock(&self.state);
        state.calls.push(Call::Delete(locator.to_string()));
        state
            .queues
            .remove(&name_of(locator))
            .map(|_| ())
            .ok_or_else(|| OperatorError::NotFound(locator.to_string()))
    }
}

/// Record store that keeps every persisted record.
#[derive(Default, Clone)]
pub struct RecordingRecordStore {
    persisted: Arc<Mutex<Vec<QueueRecord>>>,
    failure: Arc<Mutex<Option<OperatorError>>>,
}

impl RecordingRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next persist fail with `error`.
    pub fn fail_next(&self, error: OperatorError) {
        *lock(&self.failure) = Some(error);
    }

    pub fn persisted(&self) -> Vec<QueueRecord> {
        lock(&self.persisted).clone()
    }

    pub fn last(&self) -> Option<QueueRecord> {
        lock(&self.persisted).last().cloned()
    }
}

#[async_trait]
impl RecordStore for RecordingRecordStore {
    async fn persist(&self, record: &QueueRecord) -> DomainResult<()> {
        if let Some(error) = lock(&self.failure).take() {
            return Err(error);
        }
        lock(&self.persisted).push(record.clone());
        Ok(())
    }
}
