//! Source registry. Loads all feature-service definitions from embedded
//! TOML configs.
//!
//! Each `.toml` file in `packages/source/sources/` is baked into the binary
//! at compile time via [`include_str!`]. Adding a new source is as simple as
//! creating a new TOML file and adding it to the list below.

use crate::source_def::{FeatureServiceDefinition, parse_source_toml};

/// TOML configs embedded at compile time.
const SOURCE_TOMLS: &[(&str, &str)] = &[
    // ── ArcGIS sources ───────────────────────────────────────────────
    ("toronto_mci", include_str!("../sources/toronto_mci.toml")),
];

/// Identifier of the source fetched when none is specified.
pub const DEFAULT_SOURCE_ID: &str = "toronto_mci";

/// Returns every registered source definition.
///
/// # Panics
///
/// Panics if any embedded TOML config is malformed or invalid.
#[must_use]
pub fn all_sources() -> Vec<FeatureServiceDefinition> {
    SOURCE_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            parse_source_toml(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse source '{name}': {e}"))
        })
        .collect()
}

/// Finds a registered source by its `id`.
#[must_use]
pub fn source_by_id(id: &str) -> Option<FeatureServiceDefinition> {
    all_sources().into_iter().find(|s| s.id == id)
}
