#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the safeto server.
//!
//! Every JSON response body is wrapped in an [`ApiEnvelope`] of the form
//! `{ "ok": bool, "message": string, "data": ... }`.

use serde::{Deserialize, Serialize};

/// Standard response wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the request succeeded.
    pub ok: bool,
    /// Short human-readable status.
    pub message: String,
    /// Payload on success, diagnostic trace on failure.
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    /// A successful response carrying `data`.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            ok: true,
            message: message.into(),
            data,
        }
    }

    /// A failed response carrying `data` (usually a trace string).
    pub fn failure(message: impl Into<String>, data: T) -> Self {
        Self {
            ok: false,
            message: message.into(),
            data,
        }
    }
}

/// Query parameters for `GET /lookup`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LookupQueryParams {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub long: f64,
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}
