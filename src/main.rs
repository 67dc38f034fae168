mod browser;
mod config;
mod error;
mod export;
mod logging;
mod pagination;
mod scraper;
mod traversal;
mod utils;

use crate::browser::Browser;
use crate::config::Config;
use crate::error::Result;
use crate::export::CsvExporter;
use crate::logging::{init_logging, parse_log_level, LoggerConfig};
use crate::scraper::Scraper;
use crate::traversal::{LiveSession, Traversal, TraversalOutcome, TraversalReport};
use std::path::Path;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_file("config.toml")?;

    let logger_config = LoggerConfig {
        directory: config.logging.directory.clone(),
        file_name: config.logging.filename.clone(),
        rotation: tracing_appender::rolling::Rotation::DAILY,
        level: parse_log_level(&config.logging.level)?,
    };
    init_logging(logger_config)?;

    log_info!("[main] Starting scraper...");
    utils::ensure_directory(&config.output.directory)?;

    log_info!(
        "[main] Connecting to WebDriver at {}",
        config.browser.webdriver_url
    );
    let browser = Browser::builder()
        .webdriver_url(&config.browser.webdriver_url)
        .headless(config.browser.headless)
        .window_size(config.browser.window_width, config.browser.window_height)
        .build()
        .await?;

    let run_result = run(&browser, &config).await;

    // The session is closed whatever happened above.
    log_info!("[main] Closing browser...");
    if let Err(e) = browser.quit().await {
        log_error!("[main] Failed to close browser session: {}", e);
    }

    if let Err(ref e) = run_result {
        log_error!("[main] Run failed: {}", e);
    }
    run_result
}

async fn run(browser: &Browser, config: &Config) -> Result<()> {
    log_info!("[main] Navigating to: {}", config.base_url);
    browser.goto(&config.base_url).await?;

    // No rendering-complete signal exists; give client-side scripts a
    // conservative window to settle.
    tokio::time::sleep(Duration::from_secs(config.browser.page_load_wait_secs)).await;
    log_info!("[main] Page loaded, starting scraping...");

    probe_structure(browser, config).await?;

    let session = LiveSession::new(browser, config);
    let report = Traversal::new(session).run().await;

    summarize(&report);
    persist(&report, config)
}

async fn probe_structure(browser: &Browser, config: &Config) -> Result<()> {
    let html = browser.source().await?;
    let structure = Scraper::new(&html).probe().report();

    if config.output.json_dump {
        let path = Path::new(&config.output.directory).join("page_structure.json");
        if let Err(e) = utils::save_json(&structure, &path) {
            log_warn!("[main] Could not dump structure report: {}", e);
        }
    }
    Ok(())
}

fn persist(report: &TraversalReport, config: &Config) -> Result<()> {
    let csv_path = Path::new(&config.output.directory).join(&config.output.csv_filename);
    let exporter = CsvExporter::new(csv_path);

    if exporter.write(&report.records) {
        log_info!(
            "[main] Successfully saved {} products to {}",
            report.records.len(),
            exporter.path().display()
        );
        log_info!(
            "[main] Successfully scraped {} pages",
            report.pages_scraped
        );
    } else {
        log_error!("[main] Failed to save results");
    }

    if config.output.json_dump {
        let json_path = Path::new(&config.output.directory).join("products.json");
        if let Err(e) = utils::save_json(&report.records, &json_path) {
            log_warn!("[main] Could not dump records as JSON: {}", e);
        } else {
            log_info!("[main] Saved JSON copy to {}", json_path.display());
        }
    }
    Ok(())
}

fn summarize(report: &TraversalReport) {
    if report.outcome == TraversalOutcome::Aborted {
        log_warn!(
            "[main] Traversal stopped early after {} of {} pages; exporting what was gathered",
            report.pages_scraped,
            report.total_pages
        );
    }

    if report.records.is_empty() {
        log_warn!("[main] No products were scraped!");
        return;
    }

    log_info!("[main] Sample of scraped products:");
    for (index, record) in report.records.iter().take(5).enumerate() {
        log_info!("[main] {}. {} - {}", index + 1, record.name, record.price);
    }
}
