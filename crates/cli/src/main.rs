// ABOUTME: CLI that builds products.json from saved marketplace listing pages.
// ABOUTME: Reads <input>/<marketplace>/*.html, runs the catalog pipeline, and writes JSON to a file or stdout.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use shelf_catalog::{load_registry_from_path, Marketplace, Pipeline};
use tracing::{debug, error, info};

/// Extract product listings from saved marketplace pages into one JSON catalog.
#[derive(Parser, Debug)]
#[command(name = "shelf-cli")]
#[command(about = "Build a product catalog from saved marketplace listing pages", long_about = None)]
struct Args {
    /// Root directory holding tokopedia/, blibli/ and klikindomaret/ snapshot folders.
    #[arg(long, default_value = ".")]
    input: PathBuf,

    /// Output file. Use "-" to write to stdout.
    #[arg(short, long, default_value = "products.json")]
    output: PathBuf,

    /// Only process these marketplaces (repeatable). Defaults to all.
    #[arg(short, long = "marketplace", value_name = "NAME")]
    marketplaces: Vec<Marketplace>,

    /// JSON locator table replacing the builtin one.
    #[arg(long, value_name = "FILE")]
    locators: Option<PathBuf>,

    /// Output compact JSON instead of pretty.
    #[arg(long, default_value_t = false)]
    compact: bool,

    /// Exit with an error if any document failed.
    #[arg(long, default_value_t = false)]
    strict: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let pipeline = match &args.locators {
        Some(path) => Pipeline::new(
            load_registry_from_path(path)
                .with_context(|| format!("loading locators from {}", path.display()))?,
        ),
        None => Pipeline::builtin().context("loading builtin locators")?,
    };
    for table in pipeline.registry().iter() {
        debug!(marketplace = %table.marketplace, card = %table.card, "locator table loaded");
    }

    let mut marketplaces = args.marketplaces.clone();
    marketplaces.sort();
    marketplaces.dedup();
    if marketplaces.is_empty() {
        marketplaces = Marketplace::ALL.to_vec();
    }

    let output = pipeline
        .run_directory(&args.input, &marketplaces)
        .with_context(|| format!("reading snapshots under {}", args.input.display()))?;

    for (marketplace, count) in &output.stats.per_marketplace {
        info!(%marketplace, products = count, "marketplace done");
    }
    for failure in &output.failures {
        error!(path = %failure.path.display(), error = %failure.error, "document failed");
    }

    if args.output.as_os_str() == "-" {
        println!("{}", output.catalog.to_json_string(args.compact)?);
    } else {
        output
            .catalog
            .write_json(&args.output, args.compact)
            .context("writing catalog")?;
        info!(
            path = %args.output.display(),
            products = output.catalog.len(),
            "catalog written"
        );
    }

    if args.strict && !output.failures.is_empty() {
        bail!(
            "{} of {} documents failed",
            output.stats.documents_failed,
            output.stats.documents_seen
        );
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}
