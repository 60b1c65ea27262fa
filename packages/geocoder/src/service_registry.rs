//! Reverse-geocoding service configuration.
//!
//! The default provider is defined in `services/nominatim.toml` and embedded
//! at compile time. `SAFETO_GEOCODER_URL` replaces its base URL at runtime
//! (e.g., to point at a self-hosted Nominatim instance).

use serde::Deserialize;

use crate::GeocodeError;

const NOMINATIM_TOML: &str = include_str!("../services/nominatim.toml");

/// A reverse-geocoding endpoint and the query options sent to it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeocoderConfig {
    /// Unique identifier (e.g., `"nominatim"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Reverse endpoint URL (e.g., `"https://nominatim.openstreetmap.org/reverse"`).
    pub base_url: String,
    /// Output format requested (`json` or `jsonv2`).
    #[serde(default = "default_format")]
    pub format: String,
    /// Whether to request the structured address breakdown.
    #[serde(default = "default_true")]
    pub address_details: bool,
    /// Optional detail level (3 = country .. 18 = building).
    #[serde(default)]
    pub zoom: Option<u8>,
}

fn default_format() -> String {
    "json".to_string()
}

const fn default_true() -> bool {
    true
}

impl GeocoderConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Config`] if the TOML is malformed or the base
    /// URL is empty.
    pub fn from_toml(toml_str: &str) -> Result<Self, GeocodeError> {
        let config: Self = toml::de::from_str(toml_str).map_err(|e| GeocodeError::Config {
            message: e.to_string(),
        })?;
        if config.base_url.trim().is_empty() {
            return Err(GeocodeError::Config {
                message: format!("{}: base_url is empty", config.id),
            });
        }
        Ok(config)
    }

    /// The embedded Nominatim config.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    #[must_use]
    pub fn nominatim() -> Self {
        Self::from_toml(NOMINATIM_TOML)
            .unwrap_or_else(|e| panic!("Failed to parse geocoding service 'nominatim': {e}"))
    }

    /// The embedded Nominatim config with `SAFETO_GEOCODER_URL` applied.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::nominatim();
        if let Ok(url) = std::env::var("SAFETO_GEOCODER_URL")
            && !url.trim().is_empty()
        {
            log::info!("Using geocoder base URL from SAFETO_GEOCODER_URL: {url}");
            config.base_url = url;
        }
        config
    }
}
