use std::path::Path;
use std::{env, io};

use chrono::Utc;

use sqldaily::configuration::Settings;
use sqldaily::delivery::{load_tip, send_newsletter};
use sqldaily::domain::TIP_FILE;
use sqldaily::subscribers::SUBSCRIBERS_FILE;
use sqldaily::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = get_subscriber("send_newsletter".into(), "info".into(), io::stdout);
    init_subscriber(subscriber);

    // Retrieve settings
    let config = Settings::get_config().expect("Failed to load configuration");

    // Resolve today's tip: an admin-provided override wins over the scraped file
    let tip = load_tip(
        env::var("TIP_CONTENT").ok(),
        env::var("TIP_SOURCE").ok(),
        Path::new(TIP_FILE),
    );

    // Send the issue to every active subscriber and report the tally
    let now = Utc::now();
    match send_newsletter(config.email_client, Path::new(SUBSCRIBERS_FILE), &tip, now).await {
        Ok(report) => {
            tracing::info!(
                sent = report.sent,
                failed = report.failed,
                tip_source = %tip.source,
                date = %now.format("%Y-%m-%d %H:%M:%S"),
                "Newsletter send summary"
            );
        }

        // An aborted run is logged, not signaled via the exit status
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "The newsletter issue was not dispatched"
            );
        }
    }

    Ok(())
}
