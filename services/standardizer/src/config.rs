use std::env;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardizerConfig {
    pub server_host: String,
    pub server_port: u16,
    pub max_body_size_bytes: usize,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Default for StandardizerConfig {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            max_body_size_bytes: 10 * 1024 * 1024,
            request_timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }
}

impl StandardizerConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = StandardizerConfig::default();

        if let Ok(host) = env::var("STANDARDIZER_HOST") {
            if !host.trim().is_empty() {
                config.server_host = host;
            }
        }

        if let Ok(port) = env::var("STANDARDIZER_PORT") {
            config.server_port = port
                .parse::<u16>()
                .context("failed to parse STANDARDIZER_PORT as u16")?;
        }

        if let Ok(limit) = env::var("MAX_BODY_SIZE_BYTES") {
            config.max_body_size_bytes = limit
                .parse::<usize>()
                .context("failed to parse MAX_BODY_SIZE_BYTES as usize")?;
        }

        if let Ok(timeout) = env::var("REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = timeout
                .parse::<u64>()
                .context("failed to parse REQUEST_TIMEOUT_SECS as u64")?;
        }

        if let Ok(level) = env::var("LOG_LEVEL") {
            if !level.trim().is_empty() {
                config.log_level = level;
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_body_size_bytes == 0 {
            return Err(anyhow!("MAX_BODY_SIZE_BYTES must be greater than zero"));
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow!("REQUEST_TIMEOUT_SECS must be greater than zero"));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = StandardizerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.listen_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn rejects_zero_limits() {
        let config = StandardizerConfig {
            max_body_size_bytes: 0,
            ..StandardizerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = StandardizerConfig {
            request_timeout_secs: 0,
            ..StandardizerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
