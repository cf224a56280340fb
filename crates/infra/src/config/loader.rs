//! Configuration loader
//!
//! Loads operator configuration from a file and environment variables.
//!
//! ## Loading Strategy
//! 1. Start from `SQS_OPERATOR_CONFIG` if set, otherwise probe for a config
//!    file, otherwise use defaults
//! 2. Apply environment variable overrides on top
//! 3. Validate the result
//!
//! JSON and TOML are supported, detected by file extension.
//!
//! ## Environment Variables
//! - `SQS_OPERATOR_CONFIG`: Explicit config file path
//! - `AWS_REGION`, `AWS_ENDPOINT_URL`: Queue service region and endpoint
//! - `SQS_OPERATOR_ANNOTATION_PREFIX`: Annotation key prefix
//! - `SQS_OPERATOR_ANNOTATE_SNAPSHOT`: Write every observed attribute
//!   (true/false)
//! - `SQS_OPERATOR_COOLDOWN_SECS`: Wait after a recently-deleted conflict
//! - `SQS_OPERATOR_COOLDOWN_MAX_ATTEMPTS`: Creation attempts while cooling down
//! - `SQS_OPERATOR_NAMESPACE`: Watch a single namespace
//! - `SQS_OPERATOR_TIMEOUT_SECS`: Per-reconciliation deadline
//! - `SQS_OPERATOR_REQUEUE_SECS`: Periodic resync interval
//! - `SQS_OPERATOR_ERROR_REQUEUE_SECS`: Retry interval after a failure
//! - `SQS_OPERATOR_LOG`: Log filter directive
//! - `SQS_OPERATOR_LOG_JSON`: Emit JSON logs (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./sqs-operator.json` or `./sqs-operator.toml`
//! 2. `./config.json` or `./config.toml`
//! 3. The same names in the parent and grandparent directories
//! 4. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use sqs_operator_domain::{OperatorConfig, OperatorError, Result};

const FILE_NAMES: [&str; 4] =
    ["sqs-operator.json", "sqs-operator.toml", "config.json", "config.toml"];

/// Load configuration with the full fallback strategy
///
/// # Errors
/// Returns `OperatorError::Config` if an explicit or probed file cannot be
/// read or parsed, an environment override is malformed, or validation
/// fails.
pub fn load() -> Result<OperatorConfig> {
    let explicit = std::env::var_os("SQS_OPERATOR_CONFIG").map(PathBuf::from);

    let mut config = match explicit.or_else(probe_config_paths) {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("No config file found, using defaults");
            OperatorConfig::default()
        }
    };

    apply_env_overrides(&mut config)?;
    config.validate()?;
    Ok(config)
}

/// Defaults with environment overrides applied
///
/// # Errors
/// Returns `OperatorError::Config` if a variable has an invalid value.
pub fn load_from_env() -> Result<OperatorConfig> {
    let mut config = OperatorConfig::default();
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Overwrite `config` fields for every recognised variable that is set
///
/// # Errors
/// Returns `OperatorError::Config` if a numeric variable does not parse.
pub fn apply_env_overrides(config: &mut OperatorConfig) -> Result<()> {
    if let Some(region) = env_string("AWS_REGION") {
        config.aws.region = Some(region);
    }
    if let Some(endpoint) = env_string("AWS_ENDPOINT_URL") {
        config.aws.endpoint_url = Some(endpoint);
    }

    if let Some(prefix) = env_string("SQS_OPERATOR_ANNOTATION_PREFIX") {
        config.reconcile.annotation_prefix = prefix;
    }
    if let Some(snapshot) = env_bool("SQS_OPERATOR_ANNOTATE_SNAPSHOT") {
        config.reconcile.annotate_snapshot = snapshot;
    }
    if let Some(secs) = env_parse("SQS_OPERATOR_COOLDOWN_SECS")? {
        config.reconcile.cooldown_delay_secs = secs;
    }
    if let Some(attempts) = env_parse("SQS_OPERATOR_COOLDOWN_MAX_ATTEMPTS")? {
        config.reconcile.cooldown_max_attempts = attempts;
    }

    if let Some(namespace) = env_string("SQS_OPERATOR_NAMESPACE") {
        config.controller.namespace = Some(namespace);
    }
    if let Some(secs) = env_parse("SQS_OPERATOR_TIMEOUT_SECS")? {
        config.controller.timeout_secs = secs;
    }
    if let Some(secs) = env_parse("SQS_OPERATOR_REQUEUE_SECS")? {
        config.controller.requeue_secs = secs;
    }
    if let Some(secs) = env_parse("SQS_OPERATOR_ERROR_REQUEUE_SECS")? {
        config.controller.error_requeue_secs = secs;
    }

    if let Some(filter) = env_string("SQS_OPERATOR_LOG") {
        config.logging.filter = filter;
    }
    if let Some(json) = env_bool("SQS_OPERATOR_LOG_JSON") {
        config.logging.json = json;
    }

    Ok(())
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations.
///
/// # Errors
/// Returns `OperatorError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<OperatorConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(OperatorError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            OperatorError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| OperatorError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration, detecting the format from the extension
fn parse_config(contents: &str, path: &Path) -> Result<OperatorConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| OperatorError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| OperatorError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(OperatorError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a config file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        roots.push(exe_dir);
    }

    roots
        .iter()
        .flat_map(|root| FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.is_file())
}

/// Non-empty environment variable
fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off`
/// (case-insensitive). Unset means `None`.
fn env_bool(key: &str) -> Option<bool> {
    env_string(key).map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_string(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| OperatorError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}
