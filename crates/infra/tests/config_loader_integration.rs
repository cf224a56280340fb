//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files and
//! layering environment overrides on top.

use std::io::Write;

use sqs_operator_domain::OperatorError;
use sqs_operator_infra::config;
use tempfile::NamedTempFile;

fn write_config(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");
    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_explicit_file_then_env_overrides_then_validation() {
    let path = write_config(
        r#"
[aws]
region = "us-west-2"
endpoint_url = "http://localhost:4566"

[reconcile]
annotation_prefix = "queues.example.com"
cooldown_delay_secs = 10

[controller]
namespace = "messaging"
"#,
        "toml",
    );

    std::env::set_var("SQS_OPERATOR_CONFIG", &path);
    std::env::set_var("SQS_OPERATOR_COOLDOWN_MAX_ATTEMPTS", "5");
    std::env::set_var("SQS_OPERATOR_LOG", "sqs_operator_core=debug");

    let config = config::load().expect("config should load");

    assert_eq!(config.aws.endpoint_url.as_deref(), Some("http://localhost:4566"));
    assert_eq!(config.reconcile.annotation_prefix, "queues.example.com");
    assert_eq!(config.reconcile.cooldown_delay_secs, 10);
    assert_eq!(config.reconcile.cooldown_max_attempts, 5);
    assert_eq!(config.controller.namespace.as_deref(), Some("messaging"));
    assert_eq!(config.logging.filter, "sqs_operator_core=debug");

    // A prefix containing '/' cannot form annotation keys.
    std::env::set_var("SQS_OPERATOR_ANNOTATION_PREFIX", "bad/prefix");
    let err = config::load().expect_err("invalid prefix should be rejected");
    assert!(matches!(err, OperatorError::Config(_)));

    std::env::set_var("SQS_OPERATOR_CONFIG", "/nonexistent/sqs-operator.toml");
    let err = config::load().expect_err("missing explicit file should be rejected");
    assert!(matches!(err, OperatorError::Config(_)));

    for var in [
        "SQS_OPERATOR_CONFIG",
        "SQS_OPERATOR_COOLDOWN_MAX_ATTEMPTS",
        "SQS_OPERATOR_LOG",
        "SQS_OPERATOR_ANNOTATION_PREFIX",
    ] {
        std::env::remove_var(var);
    }
    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_json_file() {
    let path = write_config(
        r#"{
            "reconcile": {"annotate_snapshot": false},
            "controller": {"timeout_secs": 120, "error_requeue_secs": 5},
            "logging": {"json": true}
        }"#,
        "json",
    );

    let config = config::load_from_file(Some(path.clone())).expect("json config should load");

    assert!(!config.reconcile.annotate_snapshot);
    assert_eq!(config.controller.timeout_secs, 120);
    assert_eq!(config.controller.error_requeue_secs, 5);
    assert!(config.logging.json);
    assert!(config.validate().is_ok());

    std::fs::remove_file(path).ok();
}
