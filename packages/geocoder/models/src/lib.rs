#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Place and address types returned by reverse geocoding.
//!
//! Field names follow the Nominatim JSON output in both directions, so a
//! [`Place`] serializes back to the same shape it was decoded from. Absent
//! optional fields are omitted on output rather than written as `null`.

use serde::{Deserialize, Serialize};

/// A place resolved from a coordinate pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Nominatim-internal place identifier.
    pub place_id: u64,
    /// Data licence attribution string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub licence: Option<String>,
    /// OSM object type (`node`, `way`, or `relation`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osm_type: Option<String>,
    /// OSM object identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osm_id: Option<u64>,
    /// Latitude as a decimal string.
    pub lat: String,
    /// Longitude as a decimal string.
    pub lon: String,
    /// Main OSM tag key (`category` in `jsonv2` output).
    #[serde(
        rename = "class",
        alias = "category",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub class: Option<String>,
    /// Main OSM tag value.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub place_type: Option<String>,
    /// Search rank of the object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_rank: Option<i32>,
    /// Computed importance rank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<f64>,
    /// Address level the object is classified as.
    #[serde(
        rename = "addresstype",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub address_type: Option<String>,
    /// Local name, often empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Full comma-separated display address.
    pub display_name: String,
    /// Address breakdown, present when address details were requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Bounding box of the object.
    pub boundingbox: BoundingBox,
}

impl Place {
    /// Parses `lat`/`lon` into `(latitude, longitude)` degrees.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.lat.parse().ok()?, self.lon.parse().ok()?))
    }

    /// City from the address breakdown, if any.
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.address.as_ref()?.city.as_deref()
    }
}

/// Structured address of a [`Place`]. Any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road: Option<String>,
    /// Neighbourhood name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighbourhood: Option<String>,
    /// Quarter or ward.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarter: Option<String>,
    /// City.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Region between city and state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_district: Option<String>,
    /// State or province.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// ISO 3166-2 subdivision code (e.g., `CA-ON`).
    #[serde(
        rename = "ISO3166-2-lvl4",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub iso3166_2_lvl4: Option<String>,
    /// Postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    /// Country name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Lowercase ISO 3166-1 alpha-2 country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// Bounding box as four decimal strings: south, north, west, east.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox(pub [String; 4]);

impl BoundingBox {
    /// Southern latitude.
    #[must_use]
    pub fn south(&self) -> &str {
        &self.0[0]
    }

    /// Northern latitude.
    #[must_use]
    pub fn north(&self) -> &str {
        &self.0[1]
    }

    /// Western longitude.
    #[must_use]
    pub fn west(&self) -> &str {
        &self.0[2]
    }

    /// Eastern longitude.
    #[must_use]
    pub fn east(&self) -> &str {
        &self.0[3]
    }

    /// Number of coordinates (always 4).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for symmetry with [`Self::len`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Parses all four bounds as `[south, north, west, east]` degrees.
    #[must_use]
    pub fn to_degrees(&self) -> Option<[f64; 4]> {
        let mut out = [0.0; 4];
        for (slot, raw) in out.iter_mut().zip(&self.0) {
            *slot = raw.parse().ok()?;
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLACE_JSON: &str = r#"{"place_id":7937679,"licence":"Data © OpenStreetMap contributors, ODbL 1.0. http://osm.org/copyright","osm_type":"way","osm_id":1004829152,"lat":"43.66674125","lon":"-79.39198131930586","class":"leisure","type":"garden","place_rank":30,"importance":9.99999999995449e-06,"addresstype":"leisure","name":"","display_name":"Queen's Park Crescent East, Bloor Street Culture Corridor, University—Rosedale, Old Toronto, Toronto, Golden Horseshoe, Ontario, M5S 1K7, Canada","address":{"road":"Queen's Park Crescent East","neighbourhood":"Bloor Street Culture Corridor","quarter":"University—Rosedale","city":"Old Toronto","state_district":"Golden Horseshoe","state":"Ontario","ISO3166-2-lvl4":"CA-ON","postcode":"M5S 1K7","country":"Canada","country_code":"ca"},"boundingbox":["43.6666818","43.6667634","-79.3921205","-79.3919253"]}"#;

    const ADDRESS_JSON: &str = r#"{"road":"Queen's Park Crescent East","neighbourhood":"Bloor Street Culture Corridor","quarter":"University—Rosedale","city":"Old Toronto","state_district":"Golden Horseshoe","state":"Ontario","ISO3166-2-lvl4":"CA-ON","postcode":"M5S 1K7","country":"Canada","country_code":"ca"}"#;

    fn place() -> Place {
        serde_json::from_str(PLACE_JSON).unwrap()
    }

    #[test]
    fn embedded_address_matches_standalone_address() {
        let standalone: Address = serde_json::from_str(ADDRESS_JSON).unwrap();
        let place = place();

        assert_eq!(place.address.as_ref(), Some(&standalone));
        assert_eq!(
            serde_json::to_string(&standalone).unwrap(),
            serde_json::to_string(&place.address).unwrap()
        );
    }

    #[test]
    fn decodes_place_fields() {
        let place = place();

        assert_eq!(place.place_id, 7_937_679);
        assert_eq!(place.osm_type.as_deref(), Some("way"));
        assert_eq!(place.osm_id, Some(1_004_829_152));
        assert_eq!(place.class.as_deref(), Some("leisure"));
        assert_eq!(place.place_type.as_deref(), Some("garden"));
        assert_eq!(place.address_type.as_deref(), Some("leisure"));
        assert_eq!(place.place_rank, Some(30));
        assert_eq!(place.name.as_deref(), Some(""));
        assert_eq!(place.city(), Some("Old Toronto"));
        assert!(place.importance.is_some_and(|i| i > 0.0 && i < 1e-4));
        assert!(place.licence.as_deref().is_some_and(|l| l.contains("ODbL")));
    }

    #[test]
    fn bounding_box_is_south_north_west_east() {
        let bbox = place().boundingbox;

        assert_eq!(bbox.len(), 4);
        assert_eq!(bbox.south(), "43.6666818");
        assert_eq!(bbox.north(), "43.6667634");
        assert_eq!(bbox.west(), "-79.3921205");
        assert_eq!(bbox.east(), "-79.3919253");

        let [south, north, west, east] = bbox.to_degrees().unwrap();
        assert!(south < north);
        assert!(west < east);
    }

    #[test]
    fn coordinates_parse_decimal_strings() {
        let (lat, lon) = place().coordinates().unwrap();
        assert!((lat - 43.666_741).abs() < 1e-5);
        assert!((lon - -79.391_981).abs() < 1e-5);
    }

    #[test]
    fn serializes_with_upstream_field_names() {
        let value = serde_json::to_value(place()).unwrap();

        assert_eq!(value["class"], "leisure");
        assert_eq!(value["type"], "garden");
        assert_eq!(value["addresstype"], "leisure");
        assert_eq!(value["address"]["ISO3166-2-lvl4"], "CA-ON");
        assert_eq!(value["address"]["state_district"], "Golden Horseshoe");
        assert_eq!(value["boundingbox"].as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn missing_address_fields_stay_absent() {
        let address: Address = serde_json::from_str(r#"{"city":"Toronto"}"#).unwrap();

        assert_eq!(address.city.as_deref(), Some("Toronto"));
        assert!(address.road.is_none());
        assert_eq!(serde_json::to_string(&address).unwrap(), r#"{"city":"Toronto"}"#);
    }

    #[test]
    fn accepts_jsonv2_category_key() {
        let value = serde_json::json!({
            "place_id": 1,
            "lat": "0",
            "lon": "0",
            "category": "highway",
            "display_name": "Somewhere",
            "boundingbox": ["0", "0", "0", "0"]
        });
        let place: Place = serde_json::from_value(value).unwrap();
        assert_eq!(place.class.as_deref(), Some("highway"));
        assert!(place.address.is_none());
    }

    #[test]
    fn rejects_bounding_box_of_wrong_length() {
        let value = serde_json::json!({
            "place_id": 1,
            "lat": "0",
            "lon": "0",
            "display_name": "Somewhere",
            "boundingbox": ["0", "0", "0"]
        });
        assert!(serde_json::from_value::<Place>(value).is_err());
    }
}
