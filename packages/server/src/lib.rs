#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for safeto.
//!
//! Serves `GET /lookup`, which reverse-geocodes a coordinate pair for the
//! map frontend, and `GET /api/health`. One HTTP transport and one
//! [`ReverseGeocoder`] are built at startup and shared by every worker.

pub mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use safeto_geocoder::{GeocoderConfig, ReverseGeocoder};
use safeto_http::{HttpTransport, ReqwestTransport, TransportConfig, TransportError};

/// Errors that stop the server from starting or running.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Binding or serving failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The upstream HTTP client could not be built.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Shared application state.
pub struct AppState {
    /// Reverse geocoder used by `/lookup`.
    pub geocoder: Arc<ReverseGeocoder>,
}

/// Where the server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind.
    pub bind_addr: String,
    /// TCP port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Reads `BIND_ADDR` and `PORT`, falling back to `127.0.0.1:8080`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr);
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        Self { bind_addr, port }
    }
}

/// Registers the API routes.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/lookup", web::get().to(handlers::lookup))
        .service(web::scope("/api").route("/health", web::get().to(handlers::health)));
}

/// Starts the safeto API server.
///
/// Builds the shared transport and geocoder from the environment, then runs
/// the Actix-Web HTTP server until it shuts down. The caller provides the
/// async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns [`ServerError::Transport`] if the HTTP client cannot be built, or
/// [`ServerError::Io`] if the server fails to bind or encounters a runtime
/// error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let transport: Arc<dyn HttpTransport> =
        Arc::new(ReqwestTransport::new(&TransportConfig::from_env())?);

    let geocoder = Arc::new(ReverseGeocoder::new(transport, GeocoderConfig::from_env()));
    log::info!(
        "Reverse geocoding via {} ({})",
        geocoder.config().name,
        geocoder.config().base_url
    );

    let state = web::Data::new(AppState { geocoder });

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(routes)
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await?;

    Ok(())
}
