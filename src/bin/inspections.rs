//! Fetch (or load) an inspection results page and print GeoJSON to stdout.
//!
//! Logs go to stderr; set `RUST_LOG=debug` for per-listing detail.

use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use clap::Parser;
use kc_inspections::geo::nominatim::{self, NominatimGeocoder};
use kc_inspections::source::{Document, InspectionQuery};
use kc_inspections::{build_feature_collection_from_document, extract_records, Options};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "inspections",
    about = "Scrape restaurant inspection results into GeoJSON"
)]
struct Cli {
    /// Read a cached results page instead of fetching one
    #[arg(long, env = "INSPECTIONS_LOAD")]
    load: Option<PathBuf>,

    /// Write the fetched results page to this file
    #[arg(long, env = "INSPECTIONS_SAVE", conflicts_with = "load")]
    save: Option<PathBuf>,

    /// Only process the first N listings
    #[arg(long, env = "INSPECTIONS_LIMIT")]
    limit: Option<usize>,

    /// Abort on the first malformed listing instead of skipping it
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Print one JSON record per line instead of geocoding
    #[arg(long, default_value_t = false)]
    records_only: bool,

    /// Restaurant name
    #[arg(long)]
    business_name: Option<String>,

    /// Street address
    #[arg(long)]
    address: Option<String>,

    /// City
    #[arg(long)]
    city: Option<String>,

    /// ZIP code
    #[arg(long)]
    zip: Option<String>,

    /// First inspection date (YYYY-MM-DD)
    #[arg(long, requires = "end")]
    start: Option<NaiveDate>,

    /// Last inspection date (YYYY-MM-DD)
    #[arg(long, requires = "start")]
    end: Option<NaiveDate>,

    /// Inspection type filter
    #[arg(long)]
    inspection_type: Option<String>,

    /// Only open businesses
    #[arg(long, default_value_t = false)]
    open_only: bool,

    /// Fuzzy business-name matching
    #[arg(long, default_value_t = false)]
    fuzzy: bool,

    /// Sort order code
    #[arg(long)]
    sort: Option<String>,

    /// Seconds to wait for the results page
    #[arg(long, env = "INSPECTIONS_FETCH_TIMEOUT_SECS", default_value_t = 30)]
    fetch_timeout_secs: u64,

    /// Nominatim search endpoint
    #[arg(long, env = "INSPECTIONS_GEOCODER_URL", default_value = nominatim::DEFAULT_ENDPOINT)]
    geocoder_url: String,

    /// Seconds to wait for one geocoding lookup
    #[arg(long, env = "INSPECTIONS_GEOCODER_TIMEOUT_SECS", default_value_t = 10)]
    geocoder_timeout_secs: u64,
}

impl Cli {
    fn query(&self) -> InspectionQuery {
        let mut query = InspectionQuery::default()
            .include_closed(!self.open_only)
            .fuzzy_search(self.fuzzy);

        if let Some(name) = &self.business_name {
            query = query.business_name(name);
        }
        if let Some(address) = &self.address {
            query = query.address(address);
        }
        if let Some(city) = &self.city {
            query = query.city(city);
        }
        if let Some(zip) = &self.zip {
            query = query.zip_code(zip);
        }
        if let (Some(start), Some(end)) = (self.start, self.end) {
            query = query.date_range(start, end);
        }
        if let Some(kind) = &self.inspection_type {
            query = query.inspection_type(kind);
        }
        if let Some(order) = &self.sort {
            query = query.sort(order);
        }
        query
    }

    fn options(&self) -> Options {
        Options {
            max_records: self.limit,
            skip_malformed_listings: !self.strict,
        }
    }

    fn document(&self) -> Result<Document, Box<dyn Error>> {
        if let Some(path) = &self.load {
            info!(path = %path.display(), "loading cached results page");
            return Ok(Document::load(path)?);
        }

        let document = Document::fetch(
            &self.query(),
            Duration::from_secs(self.fetch_timeout_secs),
        )?;
        if let Some(path) = &self.save {
            document.save(path)?;
            info!(path = %path.display(), "cached results page");
        }
        Ok(document)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let options = cli.options();
    let document = cli.document()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.records_only {
        for record in extract_records(&document.decode(), &options)? {
            writeln!(out, "{}", serde_json::to_string(&record)?)?;
        }
        return Ok(());
    }

    let geocoder = NominatimGeocoder::with_endpoint(
        &cli.geocoder_url,
        Duration::from_secs(cli.geocoder_timeout_secs),
        nominatim::DEFAULT_USER_AGENT,
    )?;
    let collection = build_feature_collection_from_document(&document, &geocoder, &options)?;
    info!(features = collection.len(), "geocoded restaurants");

    serde_json::to_writer_pretty(&mut out, &collection)?;
    writeln!(out)?;
    Ok(())
}
