//! Nominatim / OpenStreetMap reverse geocoder client.
//!
//! Resolves a coordinate pair to the nearest [`Place`] with a single GET to
//! the `/reverse` endpoint. Coordinates are forwarded as given; range
//! checking is left to the upstream service.
//!
//! The public instance allows at most 1 request per second and requires an
//! identifying `User-Agent`; the shared transport supplies the header and
//! callers are responsible for pacing.
//!
//! See <https://nominatim.org/release-docs/develop/api/Reverse/>

use std::sync::Arc;

use safeto_geocoder_models::Place;
use safeto_http::{HttpRequest, HttpTransport};

use crate::GeocodeError;
use crate::service_registry::GeocoderConfig;

/// Reverse geocoder bound to one endpoint and the shared transport.
pub struct ReverseGeocoder {
    transport: Arc<dyn HttpTransport>,
    config: GeocoderConfig,
}

impl ReverseGeocoder {
    /// Creates a geocoder for `config` using the shared `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>, config: GeocoderConfig) -> Self {
        Self { transport, config }
    }

    /// The endpoint configuration in use.
    #[must_use]
    pub const fn config(&self) -> &GeocoderConfig {
        &self.config
    }

    /// Resolves `(latitude, longitude)` to a place.
    ///
    /// Returns `None` both when nothing is found there and when the upstream
    /// could not be reached or answered with something undecodable; the
    /// cause is logged. Use [`Self::try_resolve`] to tell the two apart.
    pub async fn resolve(&self, latitude: f64, longitude: f64) -> Option<Place> {
        match self.try_resolve(latitude, longitude).await {
            Ok(Some(place)) => Some(place),
            Ok(None) => {
                log::info!("No place found at ({latitude}, {longitude})");
                None
            }
            Err(e) => {
                log::warn!("Reverse geocoding ({latitude}, {longitude}) failed: {e}");
                None
            }
        }
    }

    /// Resolves `(latitude, longitude)`, separating "no place here"
    /// (`Ok(None)`) from transport and decode failures.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Transport`] if the request fails, or
    /// [`GeocodeError::Decode`] if the body is not a place or an upstream
    /// error object.
    pub async fn try_resolve(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<Place>, GeocodeError> {
        let request = self.request(latitude, longitude);
        let body = self.transport.get(&request).await?;
        let value: serde_json::Value = serde_json::from_str(&body)?;
        parse_response(value)
    }

    fn request(&self, latitude: f64, longitude: f64) -> HttpRequest {
        let mut request = HttpRequest::get(&self.config.base_url)
            .param("lat", latitude)
            .param("lon", longitude)
            .param("format", &self.config.format);

        if self.config.address_details {
            request = request.param("addressdetails", 1);
        }
        if let Some(zoom) = self.config.zoom {
            request = request.param("zoom", zoom);
        }

        request
    }
}

/// Parses a Nominatim reverse response.
///
/// An object carrying an `error` member (e.g. `{"error": "Unable to
/// geocode"}`) means nothing was found.
fn parse_response(body: serde_json::Value) -> Result<Option<Place>, GeocodeError> {
    if let Some(error) = body.get("error") {
        log::debug!("Nominatim returned error: {error}");
        return Ok(None);
    }

    Ok(Some(serde_json::from_value(body)?))
}

#[cfg(test)]
mod tests {
    use safeto_http::test_support::ScriptedTransport;

    use super::*;

    const PLACE_BODY: &str = r#"{"place_id":7937679,"licence":"Data © OpenStreetMap contributors, ODbL 1.0. http://osm.org/copyright","osm_type":"way","osm_id":1004829152,"lat":"43.66674125","lon":"-79.39198131930586","class":"leisure","type":"garden","place_rank":30,"importance":9.99999999995449e-06,"addresstype":"leisure","name":"","display_name":"Queen's Park Crescent East, Bloor Street Culture Corridor, University—Rosedale, Old Toronto, Toronto, Golden Horseshoe, Ontario, M5S 1K7, Canada","address":{"road":"Queen's Park Crescent East","neighbourhood":"Bloor Street Culture Corridor","quarter":"University—Rosedale","city":"Old Toronto","state_district":"Golden Horseshoe","state":"Ontario","ISO3166-2-lvl4":"CA-ON","postcode":"M5S 1K7","country":"Canada","country_code":"ca"},"boundingbox":["43.6666818","43.6667634","-79.3921205","-79.3919253"]}"#;

    fn geocoder(transport: &Arc<ScriptedTransport>) -> ReverseGeocoder {
        let shared: Arc<dyn HttpTransport> = transport.clone();
        ReverseGeocoder::new(shared, GeocoderConfig::nominatim())
    }

    #[tokio::test]
    async fn resolves_queens_park() {
        let transport = Arc::new(ScriptedTransport::new().with_body(PLACE_BODY));

        let place = geocoder(&transport).resolve(43.6667, -79.3920).await.unwrap();

        assert_eq!(place.city(), Some("Old Toronto"));
        assert_eq!(place.boundingbox.len(), 4);
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn sends_coordinates_and_requests_address_breakdown() {
        let transport = Arc::new(ScriptedTransport::new().with_body(PLACE_BODY));

        geocoder(&transport).resolve(43.6667, -79.392).await;

        let request = &transport.requests()[0];
        assert_eq!(request.url, "https://nominatim.openstreetmap.org/reverse");
        assert_eq!(request.query_value("lat"), Some("43.6667"));
        assert_eq!(request.query_value("lon"), Some("-79.392"));
        assert_eq!(request.query_value("format"), Some("json"));
        assert_eq!(request.query_value("addressdetails"), Some("1"));
        assert_eq!(request.query_value("zoom"), None);
    }

    #[tokio::test]
    async fn unable_to_geocode_is_not_found_rather_than_error() {
        let transport =
            Arc::new(ScriptedTransport::new().with_body(r#"{"error":"Unable to geocode"}"#));

        let result = geocoder(&transport).try_resolve(0.0, -160.0).await;

        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn out_of_range_coordinates_are_forwarded() {
        let transport = Arc::new(ScriptedTransport::new().with_body(
            r#"{"error":{"code":400,"message":"Floating-point number expected for parameter 'lat'"}}"#,
        ));

        let place = geocoder(&transport).resolve(123.0, 456.0).await;

        assert!(place.is_none());
        assert_eq!(transport.requests()[0].query_value("lat"), Some("123"));
    }

    #[tokio::test]
    async fn transport_failure_resolves_to_none() {
        let transport = Arc::new(ScriptedTransport::new().with_failure("connection refused"));
        let geocoder = geocoder(&transport);

        assert!(matches!(
            geocoder.try_resolve(43.6667, -79.392).await,
            Err(GeocodeError::Transport(_))
        ));
        assert!(geocoder.resolve(43.6667, -79.392).await.is_none());
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_failure() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .with_body("<html>502 Bad Gateway</html>")
                .with_body(r#"{"place_id": 1}"#),
        );
        let geocoder = geocoder(&transport);

        assert!(matches!(
            geocoder.try_resolve(43.6667, -79.392).await,
            Err(GeocodeError::Decode(_))
        ));
        assert!(matches!(
            geocoder.try_resolve(43.6667, -79.392).await,
            Err(GeocodeError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn optional_zoom_is_sent_when_configured() {
        let transport = Arc::new(ScriptedTransport::new().with_body(PLACE_BODY));
        let config = GeocoderConfig {
            zoom: Some(18),
            ..GeocoderConfig::nominatim()
        };
        let shared: Arc<dyn HttpTransport> = transport.clone();

        let geocoder = ReverseGeocoder::new(shared, config);
        assert_eq!(geocoder.config().zoom, Some(18));

        geocoder.resolve(43.6667, -79.392).await;

        assert_eq!(transport.requests()[0].query_value("zoom"), Some("18"));
    }
}
