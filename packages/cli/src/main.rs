#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for GeoAid.
//!
//! Runs one of the three finders (intersection, street, highway) from a
//! subcommand, or opens an interactive form when no subcommand is given.
//!
//! Uses `indicatif-log-bridge` (via [`geo_aid_cli_utils::init_logger`])
//! so log lines and the loading spinner never fight for the terminal.

mod input;
mod interactive;
mod render;

use std::future::Future;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use geo_aid_cli_utils::{LoadingSpinner, MultiProgress};
use geo_aid_finder::{FinderState, Finders, RoadPair};
use geo_aid_geocoder::nominatim::NominatimClient;
use geo_aid_geocoder::service_registry;
use geo_aid_geocoder_models::Domain;

#[derive(Parser)]
#[command(
    name = "geo_aid",
    about = "Find intersections, streets and highways on OpenStreetMap"
)]
struct Cli {
    /// Nominatim search endpoint (overrides `GEO_AID_BASE_URL`)
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find where two roads meet
    Intersection {
        /// First road (e.g., "Main Street")
        #[arg(value_parser = input::non_blank)]
        road1: String,
        /// Second road (e.g., "Broadway")
        #[arg(value_parser = input::non_blank)]
        road2: String,
    },
    /// Find streets by name. Include the city for better results
    Street {
        /// Street name (e.g., "Main Street, Boston")
        #[arg(value_parser = input::non_blank)]
        name: String,
    },
    /// Find highways by name or number. Include the state/country for
    /// better results
    Highway {
        /// Highway name or number (e.g., "MN-62", "A1", "Route 66")
        #[arg(value_parser = input::non_blank)]
        name: String,
    },
}

/// Awaits `search` while a spinner runs on `multi` (if any).
async fn with_spinner<F: Future>(
    multi: Option<&MultiProgress>,
    domain: Domain,
    search: F,
) -> F::Output {
    let spinner = multi.map_or_else(LoadingSpinner::hidden, |m| {
        LoadingSpinner::start(m, &format!("Searching {domain}..."))
    });
    let output = search.await;
    spinner.finish();
    output
}

fn print_state<T: render::ResultSet>(
    domain: Domain,
    state: &FinderState<T>,
    json: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    if json {
        println!("{}", render::json(domain, state)?);
    } else {
        println!("{}", render::text(domain, state));
    }

    Ok(if matches!(state, FinderState::Failed { .. }) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let multi = geo_aid_cli_utils::init_logger();
    let cli = Cli::parse();

    let config = service_registry::nominatim_from_env()?.with_base_url(cli.base_url.as_deref());
    log::info!("Geocoding with {} ({})", config.name, config.base_url);
    let client = Arc::new(NominatimClient::from_config(&config)?);
    let mut finders = Finders::new(client);

    let Some(command) = cli.command else {
        interactive::run(&multi, &mut finders).await?;
        return Ok(ExitCode::SUCCESS);
    };

    let spinner = (!cli.json).then_some(&multi);

    match command {
        Commands::Intersection { road1, road2 } => {
            let roads = RoadPair::new(road1, road2);
            let state = with_spinner(
                spinner,
                Domain::Intersection,
                finders.find_intersection(&roads),
            )
            .await;
            print_state(Domain::Intersection, state, cli.json)
        }
        Commands::Street { name } => {
            let state = with_spinner(spinner, Domain::Street, finders.find_streets(&name)).await;
            print_state(Domain::Street, state, cli.json)
        }
        Commands::Highway { name } => {
            let state = with_spinner(spinner, Domain::Highway, finders.find_highways(&name)).await;
            print_state(Domain::Highway, state, cli.json)
        }
    }
}
