//! An unofficial Rust client for BigML's dataset API.
//!
//! BigML is an commercial machine-learning service. This unofficial library
//! lets you list the datasets in a BigML account and fetch individual
//! datasets, decoded into ordinary Rust structs.
//!
//! ```no_run
//! # async fn example() -> bigml_datasets::Result<()> {
//! // Create a BigML client talking to the development area.
//! let client = bigml_datasets::Client::new("username", "api_key", true)?;
//!
//! // Fetch the first page of datasets.
//! let page = client.list_datasets().await?;
//! for dataset in &page.datasets {
//!     println!("{} {}", dataset.resource, dataset.name);
//! }
//!
//! // Fetch a single dataset by its hex ID.
//! let dataset = client.get_dataset("53e3dd0fffa0440f4300a95c").await?;
//! println!("objective: {}", dataset.objective_field.name);
//! # Ok(())
//! # }
//! ```
//!
//! Requests are logged using `tracing` at the `debug` level, with API keys
//! removed.

#![warn(missing_docs)]

pub use client::{Client, DEFAULT_BIGML_DOMAIN};
pub use errors::*;

mod client;
mod errors;
pub mod resource;
