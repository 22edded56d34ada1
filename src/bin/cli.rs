//! geocluster CLI - run viewport filtering and clustering over a record dump
//!
//! Usage:
//!   geocluster-cli clusters <file> [--zoom <n>] [--strategy divide|multiply] [--bounds n,s,e,w]
//!   geocluster-cli points <file> [--bounds n,s,e,w]
//!   geocluster-cli ids <file> --bounds n,s,e,w
//!
//! `<file>` is a JSON array of records:
//! `[{"id": 1, "name": "...", "coordinate": "-6.2,106.8"}, ...]`.
//! Results are printed as JSON on stdout; statistics go to the log.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use log::{error, info};
use serde::Serialize;

use geocluster::{BoundsParams, GeoRecord, MapQuery, Result, sort_clusters};

#[derive(Parser)]
#[command(name = "geocluster-cli")]
#[command(about = "Filter and cluster lat,lng records for map display", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pretty-print JSON output
    #[arg(short, long, global = true)]
    pretty: bool,
}

#[derive(Args)]
struct Filters {
    /// JSON file containing an array of records
    file: PathBuf,

    /// Viewport as north,south,east,west
    #[arg(short, long, allow_hyphen_values = true)]
    bounds: Option<String>,

    /// Case-insensitive search on id, name, address and metadata
    #[arg(short, long)]
    search: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Bucket records into zoom-dependent clusters
    Clusters {
        #[command(flatten)]
        filters: Filters,

        /// Map zoom level
        #[arg(short, long, default_value = "10", allow_hyphen_values = true)]
        zoom: i32,

        /// Grid strategy: divide or multiply
        #[arg(long, default_value = "divide")]
        strategy: String,

        /// Sort clusters by key instead of first-seen order
        #[arg(long)]
        sorted: bool,
    },

    /// List every located record as an individual point
    Points {
        #[command(flatten)]
        filters: Filters,
    },

    /// Print the ids of records inside the viewport
    Ids {
        #[command(flatten)]
        filters: Filters,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Clusters {
            filters,
            zoom,
            strategy,
            sorted,
        } => {
            let records = load_records(&filters.file)?;
            let query = MapQuery {
                zoom,
                strategy: Some(strategy),
                ..build_query(&filters)?
            };

            let (mut clusters, stats) = query.clusters(&records)?;
            if sorted {
                sort_clusters(&mut clusters);
            }

            info!(
                "{} clusters from {} records ({} unparseable, {} out of bounds)",
                stats.clusters, stats.total, stats.unparseable, stats.out_of_bounds
            );
            print_json(&clusters, cli.pretty)
        }
        Commands::Points { filters } => {
            let records = load_records(&filters.file)?;
            let points = build_query(&filters)?.points(&records);
            info!("{} of {} records located", points.len(), records.len());
            print_json(&points, cli.pretty)
        }
        Commands::Ids { filters } => {
            let records = load_records(&filters.file)?;
            let query = build_query(&filters)?;

            match query.ids(&records) {
                Some(ids) => {
                    let mut ids: Vec<String> = ids.into_iter().collect();
                    ids.sort();
                    info!("{} of {} records inside bounds", ids.len(), records.len());
                    print_json(&ids, cli.pretty)
                }
                None => {
                    info!("No valid bounds given; listing is unrestricted");
                    print_json(&serde_json::Value::Null, cli.pretty)
                }
            }
        }
    }
}

fn build_query(filters: &Filters) -> Result<MapQuery> {
    let bounds = filters
        .bounds
        .as_deref()
        .map(BoundsParams::parse_compact)
        .transpose()?;

    Ok(MapQuery {
        bounds,
        search: filters.search.clone(),
        ..MapQuery::default()
    })
}

fn load_records(path: &Path) -> Result<Vec<GeoRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let records: Vec<GeoRecord> = serde_json::from_reader(reader)?;
    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
