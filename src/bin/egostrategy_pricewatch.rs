use egostrategy_pricewatch::config::Config;
use egostrategy_pricewatch::scrapers::yahoo::YahooScraper;
use egostrategy_pricewatch::services::document_service::DocumentService;
use egostrategy_pricewatch::services::quote_service::QuoteService;
use egostrategy_pricewatch::services::report::render_report;

use clap::App;
use log::{debug, info};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::init();

    // 没有任何参数，只提供 --help 和 --version
    App::new("PriceWatch")
        .version(env!("CARGO_PKG_VERSION"))
        .author("PriceWatch Team")
        .about("Fetches adjusted closes and updates the price table in README.md")
        .get_matches();

    let config = Config::new();
    info!(
        "Tracking {} since {}, writing to {}",
        config.symbols.join(", "),
        config.baseline,
        config.readme_path
    );

    let documents = DocumentService::new(
        &config.readme_path,
        config.policy,
        &config.start_marker,
        &config.end_marker,
    );

    let scraper = YahooScraper::new()?;
    let quote_service = QuoteService::new(config, Arc::new(scraper));

    let report = quote_service.fetch().await;
    debug!("Report: {}", report.to_json()?);
    let table = render_report(&report);
    documents.update(&table)?;
    info!("Report written to {}", documents.path().display());

    println!("README updated successfully.");
    Ok(())
}
