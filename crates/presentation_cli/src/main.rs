//! I-need-help CLI
//!
//! Finds the nearest police, fire or ambulance station for a coordinate.

#![allow(clippy::print_stdout)]

mod render;

use std::path::PathBuf;

use application::ports::ReverseGeocoderPort;
use application::services::SearchOutcome;
use clap::{Parser, Subcommand};
use domain::{Department, GeoLocation};
use infrastructure::{AppConfig, ReverseGeocoderAdapter, build_department_finder, init_logging};
use tracing::debug;

/// I-need-help CLI
#[derive(Parser)]
#[command(name = "ineedhelp-cli")]
#[command(author, version, about = "Nearest emergency department lookup", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, env = "INEEDHELP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the nearest facilities of a department
    ///
    /// Example: ineedhelp-cli find --lat 48.2082 --lon 16.3738 --department ambulance
    Find {
        /// Latitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// police, fire or ambulance
        #[arg(short, long)]
        department: Department,

        /// Largest search radius in meters (overrides configuration)
        #[arg(long)]
        max_radius: Option<u32>,

        /// Radius increment in meters (overrides configuration)
        #[arg(long)]
        step: Option<u32>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a coordinate to a postal address
    Reverse {
        /// Latitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Print the address as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config {
        /// Probe the Overpass and geocoding backends
        #[arg(long)]
        check: bool,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(level) = log_filter_from_verbosity(cli.verbose) {
        config.logging = config.logging.with_level(level);
    }
    init_logging(&config.logging)?;
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Find {
            lat,
            lon,
            department,
            max_radius,
            step,
            json,
        } => {
            let mut request = config.search.request(lat, lon, department)?;
            if let Some(max_radius) = max_radius {
                request = request.with_max_radius(max_radius);
            }
            if let Some(step) = step {
                request = request.with_step(step);
            }

            let finder = build_department_finder(&config)?;
            let outcome = finder.search(&request).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
                if !outcome.is_found() {
                    std::process::exit(1);
                }
                return Ok(());
            }

            match outcome {
                SearchOutcome::Found(locations) => {
                    println!(
                        "{}",
                        render::results_heading(department, locations.len(), lat, lon)
                    );
                    for (index, location) in locations.iter().enumerate() {
                        println!();
                        println!("{}", render::location_entry(index + 1, location));
                    }
                },
                SearchOutcome::NotFound => {
                    println!(
                        "❌ No {} found within {} m",
                        department.label().to_lowercase(),
                        request.max_radius_m
                    );
                    std::process::exit(1);
                },
                SearchOutcome::NetworkError(reason) => {
                    println!("❌ Search failed: {reason}");
                    std::process::exit(1);
                },
            }
        },

        Commands::Reverse { lat, lon, json } => {
            let location = GeoLocation::new(lat, lon)?;
            let geocoder = ReverseGeocoderAdapter::new(&config.geocoding)?;

            match geocoder.reverse_geocode(location).await {
                Some(address) if json => {
                    println!("{}", serde_json::to_string_pretty(&address)?);
                },
                Some(address) => {
                    println!("📍 {}", render::address_line(&address));
                },
                None => {
                    println!(
                        "❌ No address found for {location} ({})",
                        geocoder.provider_name()
                    );
                    std::process::exit(1);
                },
            }
        },

        Commands::Config { check } => {
            println!("{}", toml::to_string_pretty(&config)?);

            if check {
                let finder = build_department_finder(&config)?;
                let status = finder.check_backends().await;
                println!("{}", render::backend_status(&status));
                if !(status.spatial && status.geocoder) {
                    std::process::exit(1);
                }
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_filter() {
        assert_eq!(log_filter_from_verbosity(0), None);
        assert_eq!(log_filter_from_verbosity(1), Some("info"));
        assert_eq!(log_filter_from_verbosity(2), Some("debug"));
        assert_eq!(log_filter_from_verbosity(9), Some("trace"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn department_parses_from_argument() {
        let cli = Cli::try_parse_from([
            "ineedhelp-cli",
            "find",
            "--lat",
            "-33.86",
            "--lon",
            "151.2",
            "--department",
            "feuerwehr",
        ])
        .unwrap();
        match cli.command {
            Commands::Find {
                lat, department, ..
            } => {
                assert!((lat + 33.86).abs() < f64::EPSILON);
                assert_eq!(department, Department::Fire);
            },
            _ => panic!("Expected Find command"),
        }
    }
}
