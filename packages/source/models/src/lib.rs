#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Wire types for `ArcGIS` feature-service queries and the aggregated
//! record model produced by the bulk fetcher.
//!
//! The attribute schema of a feature belongs to the upstream dataset, so
//! records are kept as an open mapping, in the field order the service sent, of field name to
//! [`AttributeValue`] rather than a fixed struct.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A scalar attribute value as sent by the feature service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// Integral JSON number.
    Integer(i64),
    /// Non-integral (or out of `i64` range) JSON number.
    Float(f64),
    /// JSON string.
    Text(String),
}

impl AttributeValue {
    /// Returns the string contents, if this is a [`Self::Text`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as an `i64`, if it is an integer.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value as an `f64`, widening integers.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Whether this is JSON `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// One feature's `attributes` object, kept exactly as decoded.
///
/// Fields stay in upstream order, so re-serializing a record reproduces the
/// service's `outFields` ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregatedRecord(IndexMap<String, AttributeValue>);

impl AggregatedRecord {
    /// Looks up a field by its upstream name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&AttributeValue> {
        self.0.get(field)
    }

    /// Number of fields in the record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates fields in upstream order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// One page of a feature-service query response.
///
/// `features` is `None` when the upstream body has no `features` key at
/// all (e.g. an `{"error": ...}` body), which the fetcher treats as the
/// end of data for the current year.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeaturePage {
    /// Features on this page.
    #[serde(default)]
    pub features: Option<Vec<Feature>>,
}

/// A single feature; geometry and any other members are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Feature {
    /// The feature's attribute object, if present.
    #[serde(default)]
    pub attributes: Option<AggregatedRecord>,
}

/// Pagination state for one year of a bulk fetch.
///
/// Lives only for the duration of a single fetch call. `offset` only ever
/// grows, and the window closes as soon as a page comes back short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    /// Year the current sub-query is restricted to.
    pub year: i32,
    /// Offset of the next page to request.
    pub offset: u64,
    /// Whether another page should be requested.
    pub has_more: bool,
}

impl FetchWindow {
    /// Opens a window at offset 0 for `year`.
    #[must_use]
    pub const fn new(year: i32) -> Self {
        Self {
            year,
            offset: 0,
            has_more: true,
        }
    }

    /// Records a page of `page_len` features requested with `page_size`.
    ///
    /// A full page advances the offset by `page_size`; anything shorter
    /// closes the window.
    pub const fn advance(&mut self, page_len: usize, page_size: u64) {
        if page_len as u64 == page_size {
            self.offset += page_size;
        } else {
            self.has_more = false;
        }
    }

    /// Closes the window without moving the offset.
    pub const fn exhaust(&mut self) {
        self.has_more = false;
    }
}
