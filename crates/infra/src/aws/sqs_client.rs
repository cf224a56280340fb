//! AWS SQS implementation of the queue service port
//!
//! One [`Client`] is built at startup and shared by every reconciliation; the
//! client is stateless and cheap to clone.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sqs::config::Region;
use aws_sdk_sqs::types::QueueAttributeName;
use aws_sdk_sqs::Client;
use sqs_operator_core::QueueService;
use sqs_operator_domain::{
    AttributeMap, AttributeSelection, AwsConfig, OperatorError, QueueLocator, Result,
};
use tracing::{debug, instrument};

use crate::errors::InfraError;

/// Build an SQS client from the default credential chain.
///
/// Region and endpoint fall back to the usual AWS environment and profile
/// resolution when not configured.
pub async fn build_client(config: &AwsConfig) -> Client {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }
    // Custom endpoint (LocalStack, ElasticMQ)
    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    Client::new(&loader.load().await)
}

/// `QueueService` backed by the AWS SDK
#[derive(Debug, Clone)]
pub struct SqsQueueService {
    client: Client,
}

impl SqsQueueService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn from_config(config: &AwsConfig) -> Self {
        Self::new(build_client(config).await)
    }
}

fn to_sdk_attributes(attributes: &AttributeMap) -> HashMap<QueueAttributeName, String> {
    attributes
        .iter()
        .map(|(name, value)| (QueueAttributeName::from(name.as_str()), value.clone()))
        .collect()
}

fn from_sdk_attributes(attributes: Option<&HashMap<QueueAttributeName, String>>) -> AttributeMap {
    attributes
        .into_iter()
        .flatten()
        .map(|(name, value)| (name.as_str().to_string(), value.clone()))
        .collect()
}

fn locator_from(url: Option<&str>, operation: &str) -> Result<QueueLocator> {
    url.map(QueueLocator::new)
        .ok_or_else(|| OperatorError::Service(format!("{operation} returned no queue URL")))
}

#[async_trait]
impl QueueService for SqsQueueService {
    #[instrument(skip(self))]
    async fn lookup_by_name(&self, name: &str) -> Result<QueueLocator> {
        let output = self
            .client
            .get_queue_url()
            .queue_name(name)
            .send()
            .await
            .map_err(InfraError::from)?;
        locator_from(output.queue_url(), "GetQueueUrl")
    }

    #[instrument(skip(self, attributes), fields(attributes = attributes.len()))]
    async fn create(&self, name: &str, attributes: &AttributeMap) -> Result<QueueLocator> {
        // An empty map is omitted rather than sent as an empty object.
        let attributes = (!attributes.is_empty()).then(|| to_sdk_attributes(attributes));
        let output = self
            .client
            .create_queue()
            .queue_name(name)
            .set_attributes(attributes)
            .send()
            .await
            .map_err(InfraError::from)?;
        locator_from(output.queue_url(), "CreateQueue")
    }

    #[instrument(skip(self, locator), fields(locator = %locator))]
    async fn get_attributes(
        &self,
        locator: &QueueLocator,
        selection: &AttributeSelection,
    ) -> Result<AttributeMap> {
        let names = match selection {
            AttributeSelection::All => vec![QueueAttributeName::All],
            AttributeSelection::Named(names) => {
                names.iter().map(|name| QueueAttributeName::from(name.as_str())).collect()
            }
        };
        let output = self
            .client
            .get_queue_attributes()
            .queue_url(locator.as_str())
            .set_attribute_names(Some(names))
            .send()
            .await
            .map_err(InfraError::from)?;
        Ok(from_sdk_attributes(output.attributes()))
    }

    #[instrument(skip(self, locator, attributes), fields(locator = %locator, attributes = attributes.len()))]
    async fn set_attributes(&self, locator: &QueueLocator, attributes: &AttributeMap) -> Result<()> {
        if attributes.is_empty() {
            debug!("no attributes to set");
            return Ok(());
        }
        self.client
            .set_queue_attributes()
            .queue_url(locator.as_str())
            .set_attributes(Some(to_sdk_attributes(attributes)))
            .send()
            .await
            .map_err(InfraError::from)?;
        Ok(())
    }

    #[instrument(skip(self, locator), fields(locator = %locator))]
    async fn delete(&self, locator: &QueueLocator) -> Result<()> {
        self.client
            .delete_queue()
            .queue_url(locator.as_str())
            .send()
            .await
            .map_err(InfraError::from)?;
        Ok(())
    }
}
