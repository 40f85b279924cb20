//! Service settings

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Listener settings, read from `SCHEDULER_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    pub host: String,
    pub port: u16,
}

impl SchedulerConfig {
    /// # Environment Variables
    /// - `SCHEDULER_HOST` (default: "0.0.0.0")
    /// - `SCHEDULER_PORT` (default: 3001)
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3001)?
            .add_source(Environment::with_prefix("SCHEDULER").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults() {
        unsafe {
            std::env::remove_var("SCHEDULER_HOST");
            std::env::remove_var("SCHEDULER_PORT");
        }

        let config = SchedulerConfig::from_env().unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:3001");
    }

    #[test]
    #[serial]
    fn test_overrides_from_env() {
        unsafe {
            std::env::set_var("SCHEDULER_HOST", "127.0.0.1");
            std::env::set_var("SCHEDULER_PORT", "8081");
        }

        let config = SchedulerConfig::from_env().unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8081);

        unsafe {
            std::env::remove_var("SCHEDULER_HOST");
            std::env::remove_var("SCHEDULER_PORT");
        }
    }
}
