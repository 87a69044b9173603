//! # Fangame Index
//!
//! A metadata aggregation pipeline that scrapes fan-made game listings from
//! PokeHarbor (WordPress) and Eevee Expo (XenForo), reconciles their
//! inconsistent fields into one normalized record shape, and writes a
//! single sorted JSON snapshot consumed by the display front end.
//!
//! ## Usage
//!
//! ```sh
//! fangame_index -o ./data.json
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Listing**: walk each category's paginated listing pages
//! 2. **Detail**: fetch each unseen item's detail page for authoritative fields
//! 3. **Merge**: combine listing hints with detail fields, dedup by URL
//! 4. **Output**: sort by recency and atomically replace the JSON snapshot
//!
//! Fetches are sequential and fail-fast per category; partial results are
//! kept, and a run that collects nothing leaves the old snapshot alone.

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod fetch;
mod models;
mod normalize;
mod outputs;
mod pipeline;
mod scrapers;

use cli::Cli;
use fetch::HttpFetcher;
use outputs::json::{ensure_writable_parent, write_snapshot};
use pipeline::Aggregator;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("fangame_index starting up");

    let args = Cli::parse();
    debug!(?args.output, args.timeout_secs, ?args.max_pages, "Parsed CLI arguments");

    // Early check: surface an unwritable output location before scraping.
    if let Err(e) = ensure_writable_parent(&args.output).await {
        error!(
            path = %args.output,
            error = %e,
            "Snapshot location is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let fetcher = HttpFetcher::new(&args.user_agent, Duration::from_secs(args.timeout_secs))
        .map_err(|e| e as Box<dyn Error>)?;

    let mut categories = config::categories();
    if let Some(cap) = args.max_pages {
        for category in &mut categories {
            category.max_pages = category.max_pages.min(cap);
        }
    }
    info!(count = categories.len(), "Loaded category configuration");

    // ---- Scrape all categories sequentially ----
    let mut aggregator = Aggregator::new(&fetcher);
    let mut records = aggregator.run(&categories).await;
    info!(count = records.len(), "Aggregation complete");

    // ---- Write the snapshot ----
    if let Err(e) = write_snapshot(&mut records, &args.output).await {
        error!(path = %args.output, error = %e, "Failed to write snapshot");
        return Err(e);
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        records = records.len(),
        "Execution complete"
    );

    Ok(())
}
