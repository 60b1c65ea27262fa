//! Config-driven feature-service definition.
//!
//! [`FeatureServiceDefinition`] captures everything the bulk fetcher needs to
//! know about one `ArcGIS` layer: where to query it, which fields to ask
//! for, which attribute holds the year, and the year range to walk.

use serde::Deserialize;

use crate::SourceError;

/// Page size used when a definition does not set one.
pub const DEFAULT_PAGE_SIZE: u64 = 2000;

/// A feature-service layer that can be bulk-fetched year by year.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeatureServiceDefinition {
    /// Unique identifier (e.g., `"toronto_mci"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Layer `query` endpoint, without a query string.
    pub query_url: String,
    /// Attribute fields requested for every feature.
    pub out_fields: Vec<String>,
    /// Spatial reference WKID for returned geometry.
    #[serde(default = "default_out_sr")]
    pub out_sr: u32,
    /// Attribute used to restrict each sub-query to one year.
    #[serde(default = "default_year_field")]
    pub year_field: String,
    /// First year fetched (inclusive).
    pub start_year: i32,
    /// Last year fetched (inclusive).
    pub end_year: i32,
    /// Records requested per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

const fn default_out_sr() -> u32 {
    4326
}

fn default_year_field() -> String {
    "OCC_YEAR".to_string()
}

const fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// Caller-supplied adjustments to a definition's year range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOverrides {
    /// Replaces [`FeatureServiceDefinition::start_year`].
    pub start_year: Option<i32>,
    /// Replaces [`FeatureServiceDefinition::end_year`].
    pub end_year: Option<i32>,
}

impl FeatureServiceDefinition {
    /// Returns a copy with `overrides` applied.
    #[must_use]
    pub fn with_overrides(&self, overrides: FetchOverrides) -> Self {
        Self {
            start_year: overrides.start_year.unwrap_or(self.start_year),
            end_year: overrides.end_year.unwrap_or(self.end_year),
            ..self.clone()
        }
    }

    /// Checks that the definition can drive a fetch.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Config`] if the year range is inverted, the
    /// page size is zero, or the query URL or field list is empty.
    pub fn validate(&self) -> Result<(), SourceError> {
        if self.start_year > self.end_year {
            return Err(SourceError::Config {
                message: format!(
                    "{}: start year {} is after end year {}",
                    self.id, self.start_year, self.end_year
                ),
            });
        }
        if self.page_size == 0 {
            return Err(SourceError::Config {
                message: format!("{}: page_size must be greater than zero", self.id),
            });
        }
        if self.query_url.trim().is_empty() {
            return Err(SourceError::Config {
                message: format!("{}: query_url is empty", self.id),
            });
        }
        if self.out_fields.is_empty() {
            return Err(SourceError::Config {
                message: format!("{}: out_fields is empty", self.id),
            });
        }
        Ok(())
    }

    /// Comma-joined `outFields` parameter value.
    #[must_use]
    pub fn out_fields_param(&self) -> String {
        self.out_fields.join(",")
    }

    /// The `where` predicate restricting results to `year`.
    #[must_use]
    pub fn year_predicate(&self, year: i32) -> String {
        format!("{}={year}", self.year_field)
    }
}

/// Parses a definition from TOML text.
///
/// # Errors
///
/// Returns [`SourceError::Config`] if the TOML is malformed or fails
/// [`FeatureServiceDefinition::validate`].
pub fn parse_source_toml(toml_str: &str) -> Result<FeatureServiceDefinition, SourceError> {
    let def: FeatureServiceDefinition =
        toml::de::from_str(toml_str).map_err(|e| SourceError::Config {
            message: e.to_string(),
        })?;
    def.validate()?;
    Ok(def)
}
