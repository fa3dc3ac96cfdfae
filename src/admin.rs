use std::path::Path;
use std::{fs, io};

use anyhow::Context;

/// Default location of the admin tips export
pub const ADMIN_TIPS_FILE: &str = "data/daily_tips.json";

/// Entry in the admin tips export; extra fields are ignored
#[derive(Debug, serde::Deserialize)]
pub struct AdminTip {
    pub date: String,
    pub content: String,
    pub source: String,
}

/// Look up the curated tip for the given date, if an admin has added one
pub fn admin_tip_for(date: &str, path: &Path) -> anyhow::Result<Option<String>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        // No export file means no admin tip for the date
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| {
                format!("Failed to read the admin tips export at {}", path.display())
            });
        }
    };

    let tips: Vec<AdminTip> =
        serde_json::from_str(&raw).context("Failed to parse the admin tips export")?;

    Ok(tips
        .into_iter()
        .find(|tip| tip.date == date && tip.source == "admin")
        .map(|tip| tip.content))
}
