//! SQS adapter tests against a mock JSON-protocol endpoint
//!
//! Requests carry `X-Amz-Target: AmazonSQS.<Operation>`; errors come back as
//! `{"__type": "com.amazonaws.sqs#<Code>", "message": ...}`.

use aws_sdk_sqs::config::retry::RetryConfig;
use aws_sdk_sqs::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_sqs::Client;
use serde_json::{json, Value};
use sqs_operator_core::QueueService;
use sqs_operator_domain::{
    AttributeMap, AttributeSelection, ConflictReason, OperatorError, QueueLocator,
};
use sqs_operator_infra::SqsQueueService;
use wiremock::matchers::{body_partial_json, header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

const QUEUE_URL: &str = "https://sqs.us-east-1.amazonaws.com/000000000000/orders";
const CONTENT_TYPE: &str = "application/x-amz-json-1.0";

fn service_for(server: &MockServer) -> SqsQueueService {
    let config = aws_sdk_sqs::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::new("AKIDTEST", "secret", None, None, "static"))
        .endpoint_url(server.uri())
        .retry_config(RetryConfig::disabled())
        .build();
    SqsQueueService::new(Client::from_conf(config))
}

fn target(operation: &str) -> wiremock::matchers::HeaderExactMatcher {
    header("x-amz-target", format!("AmazonSQS.{operation}").as_str())
}

fn ok(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), CONTENT_TYPE)
}

fn sqs_error(status: u16, code: &str, message: &str) -> ResponseTemplate {
    let body = json!({"__type": format!("com.amazonaws.sqs#{code}"), "message": message});
    ResponseTemplate::new(status).set_body_raw(body.to_string(), CONTENT_TYPE)
}

fn attributes(entries: &[(&str, &str)]) -> AttributeMap {
    entries.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
}

#[tokio::test]
async fn lookup_returns_queue_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(target("GetQueueUrl"))
        .and(body_partial_json(json!({"QueueName": "orders"})))
        .respond_with(ok(json!({"QueueUrl": QUEUE_URL})))
        .expect(1)
        .mount(&server)
        .await;

    let locator = service_for(&server).lookup_by_name("orders").await.expect("lookup");

    assert_eq!(locator.as_str(), QUEUE_URL);
}

#[tokio::test]
async fn lookup_of_missing_queue_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(target("GetQueueUrl"))
        .respond_with(sqs_error(400, "QueueDoesNotExist", "The specified queue does not exist."))
        .mount(&server)
        .await;

    let err = service_for(&server).lookup_by_name("orders").await.expect_err("should fail");

    assert!(err.is_not_found(), "unexpected error: {err:?}");
}

#[tokio::test]
async fn create_sends_attributes_and_returns_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(target("CreateQueue"))
        .and(body_partial_json(json!({
            "QueueName": "orders",
            "Attributes": {"VisibilityTimeout": "30", "FifoQueue": "true"}
        })))
        .respond_with(ok(json!({"QueueUrl": QUEUE_URL})))
        .expect(1)
        .mount(&server)
        .await;

    let locator = service_for(&server)
        .create("orders", &attributes(&[("VisibilityTimeout", "30"), ("FifoQueue", "true")]))
        .await
        .expect("create");

    assert_eq!(locator, QueueLocator::new(QUEUE_URL));
}

#[tokio::test]
async fn create_with_no_attributes_omits_the_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(target("CreateQueue"))
        .respond_with(ok(json!({"QueueUrl": QUEUE_URL})))
        .mount(&server)
        .await;

    service_for(&server).create("orders", &AttributeMap::new()).await.expect("create");

    let requests = server.received_requests().await.expect("request recording enabled");
    let body: Value = serde_json::from_slice(&requests[0].body).expect("json body");
    assert_eq!(body["QueueName"], "orders");
    assert!(body.get("Attributes").is_none(), "unexpected body: {body}");
}

#[tokio::test]
async fn create_conflicts_are_classified() {
    let cases = [
        ("QueueDeletedRecently", ConflictReason::RecentlyDeleted),
        ("QueueNameExists", ConflictReason::AlreadyExists),
    ];

    for (code, reason) in cases {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(target("CreateQueue"))
            .respond_with(sqs_error(400, code, "conflict"))
            .mount(&server)
            .await;

        let err = service_for(&server)
            .create("orders", &AttributeMap::new())
            .await
            .expect_err("should conflict");

        assert!(err.is_conflict(reason), "{code}: unexpected error {err:?}");
    }
}

#[tokio::test]
async fn get_all_attributes_maps_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(target("GetQueueAttributes"))
        .and(body_partial_json(json!({"QueueUrl": QUEUE_URL, "AttributeNames": ["All"]})))
        .respond_with(ok(json!({"Attributes": {
            "QueueArn": "arn:aws:sqs:us-east-1:000000000000:orders",
            "VisibilityTimeout": "30",
            "ApproximateNumberOfMessages": "0"
        }})))
        .mount(&server)
        .await;

    let snapshot = service_for(&server)
        .get_attributes(&QueueLocator::new(QUEUE_URL), &AttributeSelection::All)
        .await
        .expect("get attributes");

    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot["VisibilityTimeout"], "30");
    assert_eq!(snapshot["QueueArn"], "arn:aws:sqs:us-east-1:000000000000:orders");
}

#[tokio::test]
async fn get_named_attributes_requests_only_those() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(target("GetQueueAttributes"))
        .and(body_partial_json(json!({"AttributeNames": ["QueueArn"]})))
        .respond_with(ok(json!({"Attributes": {"QueueArn": "arn:x"}})))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = service_for(&server)
        .get_attributes(
            &QueueLocator::new(QUEUE_URL),
            &AttributeSelection::Named(vec!["QueueArn".into()]),
        )
        .await
        .expect("get attributes");

    assert_eq!(snapshot, attributes(&[("QueueArn", "arn:x")]));
}

#[tokio::test]
async fn set_attributes_sends_full_map() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(target("SetQueueAttributes"))
        .and(body_partial_json(json!({
            "QueueUrl": QUEUE_URL,
            "Attributes": {"RedrivePolicy": "{\"maxReceiveCount\":\"5\",\"deadLetterTargetArn\":\"arn:x\"}"}
        })))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    service_for(&server)
        .set_attributes(
            &QueueLocator::new(QUEUE_URL),
            &attributes(&[(
                "RedrivePolicy",
                r#"{"maxReceiveCount":"5","deadLetterTargetArn":"arn:x"}"#,
            )]),
        )
        .await
        .expect("set attributes");
}

#[tokio::test]
async fn delete_of_missing_queue_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(target("DeleteQueue"))
        .respond_with(sqs_error(400, "QueueDoesNotExist", "gone"))
        .mount(&server)
        .await;

    let err = service_for(&server)
        .delete(&QueueLocator::new(QUEUE_URL))
        .await
        .expect_err("should fail");

    assert!(err.is_not_found(), "unexpected error: {err:?}");
}

#[tokio::test]
async fn unexpected_failure_is_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(target("DeleteQueue"))
        .respond_with(sqs_error(400, "AccessDenied", "not allowed"))
        .mount(&server)
        .await;

    let err = service_for(&server)
        .delete(&QueueLocator::new(QUEUE_URL))
        .await
        .expect_err("should fail");

    assert!(matches!(err, OperatorError::Service(_)), "unexpected error: {err:?}");
}
