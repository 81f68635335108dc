use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use loo_finder::data::loader::load_file;
use loo_finder::data::model::DirectionsRequest;
use loo_finder::{Coordinate, CycleOutcome, DatasetClient, FinderConfig, FinderState};

/// Find the nearest public toilets to a position
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Your latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Your longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// How many facilities to show
    #[arg(short = 'k', long)]
    limit: Option<usize>,

    /// Dataset URL returning a JSON array of string arrays
    #[arg(long)]
    source_url: Option<String>,

    /// Read the dataset from a local .json or .csv file instead
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also show facilities without baby change
    #[arg(long)]
    any_baby_change: bool,

    /// Only show accessible facilities
    #[arg(long)]
    accessible: bool,

    /// Print opening hours, access, baby change and charge for each result
    #[arg(long)]
    details: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn finder_config(&self) -> Result<FinderConfig> {
        let mut config = match &self.config {
            Some(path) => FinderConfig::from_file(path)?,
            None => FinderConfig::default(),
        };
        if let Some(limit) = self.limit {
            config.limit = limit;
        }
        if let Some(url) = &self.source_url {
            config.source_url = url.clone();
        }
        if self.any_baby_change {
            config.filter.baby_change_required = false;
        }
        if self.accessible {
            config.filter.accessible_required = true;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.finder_config()?;
    let reference = Coordinate::new(cli.lat, cli.lon);

    let mut state = FinderState::new(config.filter, config.limit);
    let ticket = state.begin_cycle();
    let fetched = match &cli.file {
        Some(path) => Ok(load_file(path)?),
        None => DatasetClient::new(&config.source_url).fetch_table().await,
    };

    match state.apply(ticket, reference, fetched) {
        CycleOutcome::Updated { .. } => {}
        CycleOutcome::FetchFailed(reason) => bail!("Could not fetch dataset: {reason}"),
        CycleOutcome::SchemaRejected(reason) => bail!("Dataset unusable: {reason}"),
        CycleOutcome::Stale => return Ok(()),
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&state.nearest)?);
        return Ok(());
    }

    if state.nearest.is_empty() {
        println!("No matching facilities found near {reference}");
        return Ok(());
    }

    for (i, ranked) in state.nearest.iter().enumerate() {
        let facility = &ranked.facility;
        println!("{:>2}. {} ({:.0} m)", i + 1, facility.name, ranked.distance_m);
        if cli.details {
            let directions = DirectionsRequest::walking_to(facility);
            for line in facility.detail_text().lines() {
                println!("      {line}");
            }
            println!("      Directions: {} at {}", directions.label, directions.destination);
        }
    }

    Ok(())
}
