//! `ArcGIS` REST bulk fetcher.
//!
//! Walks a feature-service layer one year at a time, paging through each
//! year with `resultOffset`/`resultRecordCount`, and merges every feature's
//! `attributes` object into one in-memory sequence.
//!
//! A year ends when a page comes back with fewer features than requested,
//! or when the body has no `features` key at all. There is no total-count
//! pre-query: a year whose final page is exactly full costs one extra
//! request that returns an empty page.

use std::sync::Arc;

use safeto_http::{HttpRequest, HttpTransport};
use safeto_source_models::{AggregatedRecord, FeaturePage, FetchWindow};

use crate::SourceError;
use crate::source_def::FeatureServiceDefinition;

/// Sequential, per-year paginated fetcher for one feature-service layer.
pub struct BulkFetcher {
    transport: Arc<dyn HttpTransport>,
    definition: FeatureServiceDefinition,
}

impl BulkFetcher {
    /// Creates a fetcher for `definition` using the shared `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Config`] if the definition is invalid.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        definition: FeatureServiceDefinition,
    ) -> Result<Self, SourceError> {
        definition.validate()?;
        Ok(Self {
            transport,
            definition,
        })
    }

    /// The definition this fetcher walks.
    #[must_use]
    pub const fn definition(&self) -> &FeatureServiceDefinition {
        &self.definition
    }

    /// Fetches every year in the configured range and returns all
    /// attribute records in request order.
    ///
    /// All-or-nothing: the first transport or decode failure aborts the
    /// whole fetch and no partial aggregate is returned.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Transport`] if a request fails, or
    /// [`SourceError::Decode`] if a page body is not valid JSON of the
    /// expected shape.
    pub async fn fetch_all(&self) -> Result<Vec<AggregatedRecord>, SourceError> {
        let def = &self.definition;
        let mut aggregate: Vec<AggregatedRecord> = Vec::new();

        for year in def.start_year..=def.end_year {
            let before = aggregate.len();
            log::info!("{}: fetching {}", def.id, def.year_predicate(year));

            let mut window = FetchWindow::new(year);
            while window.has_more {
                self.fetch_page(&mut window, &mut aggregate).await?;
            }

            log::info!(
                "{}: {year} complete, {} records in {} page(s)",
                def.id,
                aggregate.len() - before,
                window.offset / def.page_size + 1,
            );
        }

        log::info!(
            "{}: total aggregated data: {} records",
            def.id,
            aggregate.len()
        );
        Ok(aggregate)
    }

    /// Requests the page at `window.offset`, appends its attribute records
    /// to `aggregate`, and moves the window on.
    async fn fetch_page(
        &self,
        window: &mut FetchWindow,
        aggregate: &mut Vec<AggregatedRecord>,
    ) -> Result<(), SourceError> {
        let def = &self.definition;
        let request = self.page_request(window);

        let body = self.transport.get(&request).await?;
        let page: FeaturePage =
            serde_json::from_str(&body).map_err(|source| SourceError::Decode {
                year: window.year,
                offset: window.offset,
                source,
            })?;

        let Some(features) = page.features else {
            log::debug!(
                "{}: year={} offset={} has no features; treating as end of data",
                def.id,
                window.year,
                window.offset
            );
            window.exhaust();
            return Ok(());
        };

        log::debug!(
            "{}: year={} offset={} returned {} features",
            def.id,
            window.year,
            window.offset,
            features.len()
        );

        let page_len = features.len();
        aggregate.extend(features.into_iter().filter_map(|f| f.attributes));
        window.advance(page_len, def.page_size);

        Ok(())
    }

    fn page_request(&self, window: &FetchWindow) -> HttpRequest {
        let def = &self.definition;
        HttpRequest::get(&def.query_url)
            .param("outFields", def.out_fields_param())
            .param("outSR", def.out_sr)
            .param("f", "json")
            .param("where", def.year_predicate(window.year))
            .param("resultOffset", window.offset)
            .param("resultRecordCount", def.page_size)
    }
}
