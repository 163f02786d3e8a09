use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use hotel_offer_search::{
    CsvDataLoader, DataConfig, DateRange, HotelSearchEngine, ProviderConfig,
    SimulatedOfferProvider,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hotel-search")]
#[command(about = "Search hotel offers in a city with simulated advertiser prices")]
struct Args {
    /// Directory holding hotels.csv, advertisers.csv, hotel_advertiser.csv and cities.csv
    #[arg(short = 'd', long, default_value = "data")]
    data_dir: PathBuf,

    /// City name, matched exactly
    #[arg(short, long)]
    city: String,

    /// First day of the stay (YYYY-MM-DD)
    #[arg(long)]
    from: NaiveDate,

    /// Last day of the stay (YYYY-MM-DD)
    #[arg(long)]
    to: NaiveDate,

    /// Seed of the simulated offer provider
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.to < args.from {
        bail!("end date {} is before start date {}", args.to, args.from);
    }

    let engine = HotelSearchEngine::new();
    engine
        .initialize(&CsvDataLoader::new(DataConfig::new(args.data_dir.clone())))
        .with_context(|| format!("Failed to load data from {}", args.data_dir.display()))?;

    let provider = SimulatedOfferProvider::new(ProviderConfig {
        seed: args.seed,
        ..Default::default()
    });
    let results = engine.search(&args.city, &DateRange::new(args.from, args.to), &provider)?;

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
