#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the safeto toolchain.
//!
//! `fetch` pulls the full crime record set from a registered ArcGIS feature
//! service, `lookup` reverse-geocodes a single coordinate pair, and `serve`
//! starts the API server.

use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand};
use safeto_geocoder::{GeocoderConfig, ReverseGeocoder};
use safeto_http::{HttpTransport, ReqwestTransport, TransportConfig};
use safeto_server::ServerConfig;
use safeto_source::FetchOverrides;
use safeto_source::registry::{DEFAULT_SOURCE_ID, all_sources};

#[derive(Parser)]
#[command(name = "safeto", about = "Toronto crime data toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download every record of a feature service, year by year
    Fetch {
        /// Source identifier (see `safeto sources`)
        #[arg(long, default_value = DEFAULT_SOURCE_ID)]
        source: String,
        /// First year to fetch (overrides the source's configured start)
        #[arg(long)]
        start_year: Option<i32>,
        /// Last year to fetch, inclusive
        #[arg(long)]
        end_year: Option<i32>,
        /// Print the fetched records as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all configured feature services
    Sources,
    /// Reverse-geocode a coordinate pair
    Lookup {
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
    /// Start the API server
    Serve {
        /// Interface to bind (defaults to `BIND_ADDR` or 127.0.0.1)
        #[arg(long)]
        bind: Option<String>,
        /// Port to listen on (defaults to `PORT` or 8080)
        #[arg(long)]
        port: Option<u16>,
    },
}

fn transport() -> Result<Arc<dyn HttpTransport>, safeto_http::TransportError> {
    Ok(Arc::new(ReqwestTransport::new(&TransportConfig::from_env())?))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            source,
            start_year,
            end_year,
            json,
        } => {
            let start = Instant::now();
            let records = safeto_source::fetch_source(
                transport()?,
                &source,
                FetchOverrides {
                    start_year,
                    end_year,
                },
            )
            .await?;

            log::info!(
                "Fetched {} records from {source} in {:.1}s",
                records.len(),
                start.elapsed().as_secs_f64()
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                println!("{}", records.len());
            }
        }
        Commands::Sources => {
            println!("{:<20} {:<11} NAME", "ID", "YEARS");
            println!("{}", "-".repeat(60));
            for source in &all_sources() {
                let years = format!("{}-{}", source.start_year, source.end_year);
                println!("{:<20} {years:<11} {}", source.id, source.name);
            }
        }
        Commands::Lookup { lat, lon } => {
            let geocoder = ReverseGeocoder::new(transport()?, GeocoderConfig::from_env());
            let place = geocoder
                .try_resolve(lat, lon)
                .await?
                .ok_or_else(|| format!("No place found at ({lat}, {lon})"))?;
            println!("{}", serde_json::to_string_pretty(&place)?);
        }
        Commands::Serve { bind, port } => {
            let defaults = ServerConfig::from_env();
            let config = ServerConfig {
                bind_addr: bind.unwrap_or(defaults.bind_addr),
                port: port.unwrap_or(defaults.port),
            };

            // actix-web brings its own runtime; keep it off the tokio workers.
            tokio::task::spawn_blocking(move || {
                actix_web::rt::System::new().block_on(safeto_server::run_server(config))
            })
            .await??;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_defaults_to_toronto_mci() {
        let cli = Cli::try_parse_from(["safeto", "fetch"]).unwrap();
        match cli.command {
            Commands::Fetch {
                source,
                start_year,
                end_year,
                json,
            } => {
                assert_eq!(source, "toronto_mci");
                assert_eq!(start_year, None);
                assert_eq!(end_year, None);
                assert!(!json);
            }
            _ => panic!("expected fetch"),
        }
    }

    #[test]
    fn lookup_accepts_negative_longitude() {
        let cli =
            Cli::try_parse_from(["safeto", "lookup", "--lat", "43.6667", "--lon", "-79.392"])
                .unwrap();
        match cli.command {
            Commands::Lookup { lat, lon } => {
                assert!((lat - 43.6667).abs() < f64::EPSILON);
                assert!((lon - -79.392).abs() < f64::EPSILON);
            }
            _ => panic!("expected lookup"),
        }
    }

    #[test]
    fn lookup_requires_both_coordinates() {
        assert!(Cli::try_parse_from(["safeto", "lookup", "--lat", "43.6"]).is_err());
    }
}
