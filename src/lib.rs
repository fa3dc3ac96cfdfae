pub mod acquisition;
pub mod admin;
pub mod configuration;
pub mod delivery;
pub mod domain;
pub mod email_client;
pub mod subscribers;
pub mod telemetry;
pub mod utils;
