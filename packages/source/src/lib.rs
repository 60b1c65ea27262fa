#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Bulk fetcher for crime incident feature services.
//!
//! Each data set is described by a [`source_def::FeatureServiceDefinition`]
//! loaded from the embedded [`registry`], and fetched in full by an
//! [`arcgis::BulkFetcher`] into an in-memory sequence of
//! [`AggregatedRecord`]s.

pub mod arcgis;
pub mod registry;
pub mod source_def;

use std::sync::Arc;

use safeto_http::{HttpTransport, TransportError};

pub use arcgis::BulkFetcher;
pub use safeto_source_models::{AggregatedRecord, AttributeValue};
pub use source_def::{FeatureServiceDefinition, FetchOverrides};

/// Errors that can occur while fetching from a feature service.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// A page body could not be decoded.
    #[error("JSON decode error for year {year} at offset {offset}: {source}")]
    Decode {
        /// Year of the failing sub-query.
        year: i32,
        /// Offset of the failing page.
        offset: u64,
        /// Underlying parser error.
        #[source]
        source: serde_json::Error,
    },

    /// Invalid or unknown source configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong.
        message: String,
    },
}

/// Fetches every record of the registered source `source_id`, with its year
/// range adjusted by `overrides`.
///
/// # Errors
///
/// Returns [`SourceError::Config`] if the source is unknown or the adjusted
/// range is invalid, and otherwise propagates [`BulkFetcher::fetch_all`]
/// failures.
pub async fn fetch_source(
    transport: Arc<dyn HttpTransport>,
    source_id: &str,
    overrides: FetchOverrides,
) -> Result<Vec<AggregatedRecord>, SourceError> {
    let definition = registry::source_by_id(source_id).ok_or_else(|| SourceError::Config {
        message: format!("Unknown source: {source_id}"),
    })?;

    let fetcher = BulkFetcher::new(transport, definition.with_overrides(overrides))?;
    let def = fetcher.definition();
    log::info!(
        "Fetching {} ({}) for {}-{}",
        def.name,
        def.id,
        def.start_year,
        def.end_year
    );

    fetcher.fetch_all().await
}
