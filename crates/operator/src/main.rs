//! sqs-operator entry point
//!
//! `sqs-operator crd` prints the CustomResourceDefinition; with no argument
//! the controller runs until SIGTERM or Ctrl-C.

use std::sync::Arc;

use kube::CustomResourceExt;
use sqs_operator::utils::logging;
use sqs_operator::{controller, OperatorContext};
use sqs_operator_infra::{config, SQSQueue};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().nth(1).as_deref() == Some("crd") {
        return print_crd();
    }

    let config = config::load()?;
    logging::init(&config.logging)?;

    info!(version = env!("CARGO_PKG_VERSION"), "sqs-operator starting");

    let ctx = OperatorContext::new(config).await?;
    controller::run(Arc::new(ctx)).await;
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_crd() -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&SQSQueue::crd())?);
    Ok(())
}
