use std::path::Path;
use std::{fmt, fs, io};

use chrono::{Datelike, Utc};
use reqwest::Client;
use scraper::{Html, Selector};

use crate::configuration::SourceSettings;
use crate::utils::error_chain_fmt;

/// Tips served when every configured source comes up empty, rotated by day of year
pub const FALLBACK_TIPS: [&str; 5] = [
    "Use EXPLAIN ANALYZE to understand query performance and identify bottlenecks in your SQL queries.",
    "Always use parameterized queries to prevent SQL injection attacks and improve query plan reuse.",
    "Index your foreign keys! They're often used in JOIN conditions and can dramatically improve query performance.",
    "Use VACUUM regularly in PostgreSQL to reclaim storage and update statistics for better query planning.",
    "Keep your statistics up to date with ANALYZE to help the query optimizer make better decisions.",
];

/// Scrape error type
#[derive(thiserror::Error)]
pub enum ScrapeError {
    #[error("Failed to fetch the page")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid CSS selector: {0}")]
    Selector(String),
}

impl fmt::Debug for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Scrape the tip of the day from the configured sources, in priority order.
/// Falls back to the built-in rotation when every source fails.
#[tracing::instrument(name = "Acquire the daily tip", skip_all)]
pub async fn acquire_tip(client: &Client, sources: &[SourceSettings]) -> String {
    for source in sources {
        match scrape_source(client, source).await {
            // First source that yields a tip wins
            Ok(Some(tip)) => {
                tracing::info!(source = %source.name, "Scraped the daily tip");
                return tip;
            }

            // No matching element with text: try the next source
            Ok(None) => {
                tracing::warn!(source = %source.name, "No tip found on the page");
            }

            // Fetch or selector error: try the next source
            Err(e) => {
                tracing::warn!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Failed to scrape source {}", source.name
                );
            }
        }
    }

    let tip = fallback_tip(Utc::now().ordinal());
    tracing::info!("Falling back to a built-in tip");
    tip.to_owned()
}

/// Fetch a single source page and extract the tip it offers, if any
#[tracing::instrument(name = "Scrape a tip source", skip_all, fields(source = %source.name))]
async fn scrape_source(
    client: &Client,
    source: &SourceSettings,
) -> Result<Option<String>, ScrapeError> {
    let response = client.get(&source.url).send().await?.error_for_status()?;
    let body = response.text().await?;
    extract_tip(&body, &source.selector)
}

/// Extract the text of the first element matching the CSS selector,
/// with the markup's internal whitespace collapsed into single spaces
fn extract_tip(html: &str, selector: &str) -> Result<Option<String>, ScrapeError> {
    let selector = Selector::parse(selector).map_err(|e| ScrapeError::Selector(e.to_string()))?;
    let document = Html::parse_document(html);

    let Some(element) = document.select(&selector).next() else {
        return Ok(None);
    };
    let text = element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}

/// Select the built-in tip for the given day of year (1-366)
pub fn fallback_tip(day_of_year: u32) -> &'static str {
    FALLBACK_TIPS[day_of_year as usize % FALLBACK_TIPS.len()]
}

/// Write the tip where the dispatch job expects to find it, creating the directory if needed
#[tracing::instrument(name = "Save the daily tip", skip(tip))]
pub fn save_tip(tip: &str, path: &Path) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, tip)
}
