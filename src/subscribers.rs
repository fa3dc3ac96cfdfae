use std::path::Path;
use std::{fs, io};

use anyhow::Context;

use crate::domain::{ActiveSubscriber, EmailAddress, SubscriberStatus};

/// Default location of the subscriber list
pub const SUBSCRIBERS_FILE: &str = "subscribers.csv";

/// Subscriber list row; extra columns in the export are ignored
#[derive(serde::Deserialize)]
struct SubscriberRecord {
    email: String,
    status: String,
}

/// Get the list of active subscribers, keeping rows with an invalid stored
/// email address as per-row errors
#[tracing::instrument(name = "Load active subscribers")]
pub fn load_active_subscribers(
    path: &Path,
) -> anyhow::Result<Vec<anyhow::Result<ActiveSubscriber>>> {
    let active_subscribers = read_subscriber_records(path)?
        .into_iter()
        .filter(|r| SubscriberStatus::parse(&r.status).is_active())
        .map(|r| match EmailAddress::parse(r.email) {
            Ok(email) => Ok(ActiveSubscriber { email }),
            Err(error) => Err(anyhow::anyhow!(error)),
        })
        .collect();

    Ok(active_subscribers)
}

/// Read the subscriber list, substituting a synthetic test row when the file
/// is missing or holds no records
fn read_subscriber_records(path: &Path) -> anyhow::Result<Vec<SubscriberRecord>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(
                "Subscriber list not found at {}, using the test row",
                path.display()
            );
            return Ok(synthetic_records());
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!("Failed to read the subscriber list at {}", path.display())
            });
        }
    };

    let records: Vec<SubscriberRecord> = csv::Reader::from_reader(raw.as_bytes())
        .deserialize()
        .collect::<Result<_, _>>()
        .context("Failed to parse the subscriber list")?;

    if records.is_empty() {
        tracing::warn!(
            "Subscriber list at {} holds no records, using the test row",
            path.display()
        );
        return Ok(synthetic_records());
    }
    Ok(records)
}

/// The development fallback row
fn synthetic_records() -> Vec<SubscriberRecord> {
    vec![SubscriberRecord {
        email: "test@example.com".to_owned(),
        status: "active".to_owned(),
    }]
}
