//! Service settings

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::time::Duration;

/// Identity service settings, read from `IDENTITY_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    pub host: String,
    pub port: u16,
    /// Base URL of the web front end; reset links point at it
    pub public_base_url: String,
    pub verification_code_ttl_secs: u64,
    pub reset_token_ttl_secs: u64,
}

impl IdentityConfig {
    /// # Environment Variables
    /// - `IDENTITY_HOST` (default: "0.0.0.0")
    /// - `IDENTITY_PORT` (default: 3000)
    /// - `IDENTITY_PUBLIC_BASE_URL` (default: "http://localhost:3000")
    /// - `IDENTITY_VERIFICATION_CODE_TTL_SECS` (default: 86400)
    /// - `IDENTITY_RESET_TOKEN_TTL_SECS` (default: 900)
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("public_base_url", "http://localhost:3000")?
            .set_default("verification_code_ttl_secs", 86_400)?
            .set_default("reset_token_ttl_secs", 900)?
            .add_source(Environment::with_prefix("IDENTITY").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn verification_code_ttl(&self) -> Duration {
        Duration::from_secs(self.verification_code_ttl_secs)
    }

    pub fn reset_token_ttl(&self) -> Duration {
        Duration::from_secs(self.reset_token_ttl_secs)
    }
}

/// SMTP settings, read from `SMTP_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    pub host: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub tls: bool,
    pub from_address: Option<String>,
    pub from_name: String,
}

impl MailConfig {
    /// # Environment Variables
    /// - `SMTP_HOST`, `SMTP_USERNAME`, `SMTP_PASSWORD`, `SMTP_FROM_ADDRESS`
    /// - `SMTP_PORT` (default: 465)
    /// - `SMTP_TLS` (default: true)
    /// - `SMTP_FROM_NAME` (default: "Sport Scheduler")
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("port", 465)?
            .set_default("tls", true)?
            .set_default("from_name", "Sport Scheduler")?
            .add_source(Environment::with_prefix("SMTP").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
