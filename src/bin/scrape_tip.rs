use std::io;
use std::path::Path;

use anyhow::Context;

use sqldaily::acquisition::{acquire_tip, save_tip};
use sqldaily::configuration::Settings;
use sqldaily::domain::TIP_FILE;
use sqldaily::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = get_subscriber("scrape_tip".into(), "info".into(), io::stdout);
    init_subscriber(subscriber);

    // Retrieve settings
    let config = Settings::get_config().expect("Failed to load configuration");

    // Scrape the tip of the day and store it for the dispatch job
    let client = config.scraper.client();
    let tip = acquire_tip(&client, &config.scraper.sources).await;
    save_tip(&tip, Path::new(TIP_FILE)).context("Failed to save the daily tip")?;

    tracing::info!(preview = %tip_preview(&tip), "Daily tip saved to {TIP_FILE}");

    Ok(())
}

/// First 100 characters of the tip, for the run log
fn tip_preview(tip: &str) -> String {
    tip.chars().take(100).collect()
}
