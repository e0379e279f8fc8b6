//! # Demo Catalog Seeder
//!
//! Loads the demo catalog and prints the admin console's validation view
//! and a few storefront quotes.
//!
//! ## Usage
//! ```bash
//! # Use the default config (~/.config/bazaar/pricing.toml)
//! cargo run -p bazaar-catalog --bin seed
//!
//! # Use a specific config file
//! cargo run -p bazaar-catalog --bin seed -- --config ./pricing.toml
//!
//! # Price on a specific date (defaults to today)
//! cargo run -p bazaar-catalog --bin seed -- --date 2026-03-21
//!
//! # Write the effective config back to disk
//! cargo run -p bazaar-catalog --bin seed -- --save-config
//!
//! # Print the validation results as JSON for the admin console
//! cargo run -p bazaar-catalog --bin seed -- --json
//! ```
//!
//! Set `RUST_LOG=debug` for per-product logging.

use std::env;
use std::path::PathBuf;

use bazaar_catalog::{
    open_catalog, seed_demo, should_retry, CatalogValidation, InMemoryCatalog, PricingService,
    ServiceConfig, StoreResult,
};
use bazaar_core::PricingContext;
use chrono::{NaiveDate, NaiveTime, Utc};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,bazaar=debug")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut date: Option<NaiveDate> = None;
    let mut save_config = false;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--date" | "-d" => {
                if i + 1 < args.len() {
                    date = Some(args[i + 1].parse()?);
                    i += 1;
                }
            }
            "--save-config" => save_config = true,
            "--json" => json = true,
            "--help" | "-h" => {
                println!("Bazaar Pricing Demo Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  Config file path (default: platform config dir)");
                println!("  -d, --date <DATE>    Pricing date, YYYY-MM-DD (default: today)");
                println!("      --save-config    Write the effective config to the config path");
                println!("      --json           Print validation results as JSON");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let config = ServiceConfig::load_or_default(config_path.clone());
    if save_config {
        config.save(config_path)?;
    }

    let on = date.unwrap_or_else(|| Utc::now().date_naive());
    info!(catalog = %config.catalog.name, %on, "Starting demo seed");

    let store = open_catalog(&config.catalog).await?;
    if store.is_empty().await {
        seed_demo(&store).await?;
    }
    let service = PricingService::new(store, config.policy.clone());
    println!("✓ Catalog has {} demo products", service.store().len().await);

    // Conflict detection view
    let validation = validate_with_retry(&service, on, config.catalog.max_attempts).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&validation)?);
        return Ok(());
    }
    let summary = validation.summary;
    println!();
    println!("Conflict Detection ({on})");
    println!("================================");
    println!("Total products:  {}", summary.total_products);
    println!("Conflicts:       {}", summary.conflict_count);
    println!("Warnings:        {}", summary.warning_count);
    println!("Clean products:  {}", summary.clean_products);
    for result in validation.results.iter().filter(|r| !r.report.is_valid) {
        println!("  ✗ {}: {}", result.product_name, result.report.summary());
    }

    // Storefront view
    println!();
    println!("Storefront quotes (qty 2)");
    println!("================================");
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
    let ctx = PricingContext::new(2, on.and_time(noon).and_utc());
    for product in validation.results.iter() {
        match service.quote(product.product_id, &ctx).await {
            Ok(quote) => {
                let offer = quote
                    .offers
                    .selected()
                    .map_or("no offer".to_string(), |o| o.title.clone());
                println!(
                    "  {:<22} {:>12}  {:<18} {:>4} offers",
                    product.product_name,
                    quote.quote.final_total.to_string(),
                    offer,
                    quote.offers.available().len()
                );
            }
            Err(e) => eprintln!("  {}: {}", product.product_name, e),
        }
    }

    println!();
    println!("✓ Seed complete!");
    Ok(())
}

/// Runs catalog validation, trying again while the catalog is unavailable.
async fn validate_with_retry(
    service: &PricingService<InMemoryCatalog>,
    on: NaiveDate,
    max_attempts: u32,
) -> StoreResult<CatalogValidation> {
    let mut attempt = 0;
    loop {
        match service.validate_catalog(None, on).await {
            Ok(validation) => return Ok(validation),
            Err(e) => {
                attempt += 1;
                if !should_retry(e.class(), attempt, max_attempts) {
                    return Err(e);
                }
                warn!(attempt, error = %e, "Catalog validation failed, retrying");
            }
        }
    }
}
