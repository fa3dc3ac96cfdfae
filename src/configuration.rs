use std::{env, time};

use config::{Config, ConfigError, Environment, File};
use reqwest::Url;
use secrecy::SecretString;
use url::ParseError;

use crate::domain::EmailAddress;
use crate::email_client::EmailClient;

/// Settings
#[derive(Clone, serde::Deserialize)]
pub struct Settings {
    pub scraper: ScraperSettings,
    pub email_client: EmailClientSettings,
}

impl Settings {
    /// Get settings from configuration files
    pub fn get_config() -> Result<Self, ConfigError> {
        let path = env::current_dir().expect("Failed to determine the current directory");
        let config_dir = path.join("config");

        // Detect the running environment (default: `dev`)
        let env: Env = env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "dev".into())
            .try_into()
            .expect("Failed to parse APP_ENVIRONMENT");

        // Read the configuration from files and environment variables
        Config::builder()
            // Base configuration file
            .add_source(File::from(config_dir.join("base.yaml")).required(true))
            // Environment-specific configuration file
            .add_source(File::from(config_dir.join(env.as_str())).required(true))
            // Environment variables (e.g., `SQLDAILY__EMAIL_CLIENT__AUTHORIZATION_TOKEN=<token>`
            // would set Settings.email_client.authorization_token)
            .add_source(Environment::with_prefix("SQLDAILY").separator("__"))
            .build()?
            .try_deserialize()
    }
}

/// Tip scraper settings
#[derive(Clone, serde::Deserialize)]
pub struct ScraperSettings {
    pub fetch_timeout_millis: u64,
    pub sources: Vec<SourceSettings>,
}

impl ScraperSettings {
    /// Build the HTTP client used to fetch tip sources
    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(self.timeout())
            .user_agent(concat!("sqldaily/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build the HTTP client")
    }

    /// Get configured fetch timeout
    pub const fn timeout(&self) -> time::Duration {
        time::Duration::from_millis(self.fetch_timeout_millis)
    }
}

/// Tip source descriptor, in priority order
#[derive(Clone, serde::Deserialize)]
pub struct SourceSettings {
    pub name: String,
    pub url: String,
    pub selector: String,
}

/// Email client settings
#[derive(Clone, serde::Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender_email: String,
    // The provider credential is supplied via the environment only
    pub authorization_token: Option<SecretString>,
    pub timeout_millis: u64,
}

impl EmailClientSettings {
    /// Build the email client, unless the provider credential is missing
    pub fn client(self) -> Option<EmailClient> {
        let base_url = self.base_url().expect("Invalid base URL");
        let sender_email = self.sender_email().expect("Invalid sender email address");
        let timeout = self.timeout();
        self.authorization_token
            .map(|token| EmailClient::new(base_url, sender_email, token, timeout))
    }

    /// Parse base URL
    pub fn base_url(&self) -> Result<Url, ParseError> {
        Url::parse(&self.base_url)
    }

    /// Parse sender email
    pub fn sender_email(&self) -> Result<EmailAddress, String> {
        EmailAddress::parse(self.sender_email.clone())
    }

    /// Get configured timeout
    pub const fn timeout(&self) -> time::Duration {
        time::Duration::from_millis(self.timeout_millis)
    }
}

/// Available runtime environments
pub enum Env {
    Development,
    Production,
}

impl Env {
    /// Represent environment as a string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "dev",
            Self::Production => "prd",
        }
    }
}

impl TryFrom<String> for Env {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "dev" => Ok(Self::Development),
            "prd" => Ok(Self::Production),
            other => Err(format!(
                "`{other}` is not a supported environment. Use either `dev` or `prd`"
            )),
        }
    }
}
