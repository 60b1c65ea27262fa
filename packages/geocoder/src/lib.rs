#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Reverse geocoding for the safeto lookup endpoint.
//!
//! Converts a latitude/longitude pair into a structured [`Place`] using
//! Nominatim / `OpenStreetMap`. The endpoint is configured by the embedded
//! [`service_registry`] TOML and every request goes through the shared
//! [`safeto_http::HttpTransport`].

pub mod nominatim;
pub mod service_registry;

pub use nominatim::ReverseGeocoder;
pub use safeto_geocoder_models::{Address, BoundingBox, Place};
pub use service_registry::GeocoderConfig;

use safeto_http::TransportError;
use thiserror::Error;

/// Errors from geocoding operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Response body was not a place or an upstream error object.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Invalid geocoder configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong.
        message: String,
    },
}
