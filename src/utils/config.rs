use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeConfig {
    pub api_endpoint: String,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "https://testnet.binancefuture.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Empty disables the file sink
    pub file_path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
            file_path: "twap_trader.log".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load from the file named by CONFIG_FILE, or fall back to testnet
    /// defaults so the CLI runs with no setup.
    pub fn load() -> Result<Self> {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::from_file(path),
            Err(_) => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_testnet() {
        let config = Config::default();

        assert_eq!(config.exchange.api_endpoint, "https://testnet.binancefuture.com");
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.file_path.is_empty());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [exchange]
            api_endpoint = "https://fapi.binance.com"
            "#,
        )
        .unwrap();

        assert_eq!(config.exchange.api_endpoint, "https://fapi.binance.com");
        // Unspecified sections keep their defaults
        assert_eq!(config.logging.level, "debug");
    }
}
