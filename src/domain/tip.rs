use std::fmt;

/// Default location of the daily tip file
pub const TIP_FILE: &str = "content/daily_tip.txt";

/// Daily tip data
#[derive(Debug, Clone)]
pub struct Tip {
    pub content: String,
    pub source: TipSource,
}

/// Origin of the daily tip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TipSource {
    Admin,
    #[default]
    Scraper,
}

impl TipSource {
    /// Parse tip source tag; only the exact value `admin` marks a curated tip
    pub fn parse(tag: &str) -> Self {
        if tag == "admin" {
            Self::Admin
        } else {
            Self::Scraper
        }
    }

    /// Represent tip source as a string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Scraper => "scraper",
        }
    }

    /// Badge displayed in the newsletter header
    pub const fn badge(&self) -> &'static str {
        match self {
            Self::Admin => "Curated by Admin",
            Self::Scraper => "Auto-Generated",
        }
    }
}

impl fmt::Display for TipSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
