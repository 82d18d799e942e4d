//! List the datasets in a BigML account, then fetch the first one in full.
//!
//! Usage: `BIGML_USERNAME=... BIGML_API_KEY=... cargo run --example list_datasets`
//!
//! Set `BIGML_DEV_MODE=0` to talk to production instead of the development
//! area.

use anyhow::{Context, Result};
use std::env;
use tracing_subscriber::{
    fmt::{format::FmtSpan, Subscriber},
    prelude::*,
    EnvFilter,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Configure tracing.
    let filter = EnvFilter::from_default_env();
    Subscriber::builder()
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_env_filter(filter)
        .finish()
        .init();

    // Get our BigML credentials.
    let bigml_username = env::var("BIGML_USERNAME")
        .context("pass BIGML_USERNAME as an environment variable")?;
    let bigml_api_key = env::var("BIGML_API_KEY")
        .context("pass BIGML_API_KEY as an environment variable")?;
    let dev_mode = env::var("BIGML_DEV_MODE").map_or(true, |v| v != "0");

    let client = bigml_datasets::Client::new(bigml_username, bigml_api_key, dev_mode)?;

    let page = client.list_datasets().await?;
    println!(
        "showing {} of {} datasets",
        page.datasets.len(),
        page.meta.total_count
    );
    for dataset in &page.datasets {
        println!(
            "{}\t{}\t{} rows\tobjective: {}",
            dataset.resource, dataset.name, dataset.rows, dataset.objective_field.name
        );
    }

    if let Some(first) = page.datasets.first() {
        let dataset = client.get_dataset(first.resource.hex_id()).await?;
        println!("{:#?}", dataset);
    }
    Ok(())
}
