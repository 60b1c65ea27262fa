//! HTTP handler functions for the safeto API.

use actix_web::{HttpResponse, web};
use safeto_server_models::{ApiEnvelope, ApiHealth, LookupQueryParams};

use crate::AppState;

/// Message sent with a resolved place.
pub const LOOKUP_OK_MESSAGE: &str = "Upstream API responded successfully";

/// Message sent when the resolver produced nothing.
pub const LOOKUP_FAILED_MESSAGE: &str = "Upstream API failed to respond";

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /lookup?lat=<float>&long=<float>`
///
/// Resolves the coordinates to a place. A failed resolution is reported as
/// a 500 whose `data` names the resolver call and its inputs, never the
/// underlying error.
pub async fn lookup(
    state: web::Data<AppState>,
    params: web::Query<LookupQueryParams>,
) -> HttpResponse {
    let LookupQueryParams { lat, long } = params.into_inner();

    match state.geocoder.resolve(lat, long).await {
        Some(place) => HttpResponse::Ok().json(ApiEnvelope::success(LOOKUP_OK_MESSAGE, place)),
        None => {
            log::warn!("Lookup failed for ({lat}, {long})");
            HttpResponse::InternalServerError().json(ApiEnvelope::failure(
                LOOKUP_FAILED_MESSAGE,
                resolve_trace(lat, long),
            ))
        }
    }
}

/// Diagnostic trace identifying the resolver call and its input.
#[must_use]
pub fn resolve_trace(lat: f64, long: f64) -> String {
    format!("[Trace] Component: ReverseGeocoder::resolve({lat:.6}, {long:.6})")
}
