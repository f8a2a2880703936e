use crate::notify::ChannelConfig;
use crate::types::{DisplayOptions, MonitoredWallet, SignerAlias};
use crate::utils::address::is_valid_evm_address;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub service: ServiceConfig,
    #[serde(default)]
    pub wallets: Vec<MonitoredWallet>,
    #[serde(default)]
    pub signers: Vec<SignerAlias>,
    #[serde(default)]
    pub display: DisplayOptions,
    /// Raw channel tables, typed by `channel_configs()` so that unknown
    /// channel types only produce warnings
    #[serde(default)]
    pub channels: Vec<serde_json::Value>,
}

/// Transaction service client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    pub app_url: String,
    pub timeout_seconds: u64,
    pub max_retries: usize,
    pub initial_backoff_ms: u64,
    pub backoff_multiplier: f64,
    pub max_backoff_seconds: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://safe-client.safe.global".to_string(),
            app_url: "https://app.safe.global".to_string(),
            timeout_seconds: 20,
            max_retries: 3,
            initial_backoff_ms: 500,
            backoff_multiplier: 2.0,
            max_backoff_seconds: 10,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file and environment variables
    ///
    /// Without an explicit path, `./config.toml` is used when present.
    /// Environment variables take precedence over file configuration:
    /// `SAFE_MONITOR_SERVICE__TIMEOUT_SECONDS=30` overrides `service.timeout_seconds`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = ServiceConfig::default();
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("config").required(false),
        };

        let config = Config::builder()
            .set_default("service.base_url", defaults.base_url)?
            .set_default("service.app_url", defaults.app_url)?
            .set_default("service.timeout_seconds", defaults.timeout_seconds)?
            .set_default("service.max_retries", defaults.max_retries as i64)?
            .set_default("service.initial_backoff_ms", defaults.initial_backoff_ms)?
            .set_default("service.backoff_multiplier", defaults.backoff_multiplier)?
            .set_default("service.max_backoff_seconds", defaults.max_backoff_seconds)?
            .add_source(file)
            .add_source(
                Environment::with_prefix("SAFE_MONITOR")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Typed channel configurations; entries that fail to parse are logged and skipped
    pub fn channel_configs(&self) -> Vec<ChannelConfig> {
        let (channels, warnings) = ChannelConfig::parse_all(&self.channels);
        for warning in warnings {
            warn!("{}", warning);
        }
        channels
    }

    /// Warn about addresses that do not look like EVM addresses
    pub fn check_addresses(&self) {
        for wallet in &self.wallets {
            if !is_valid_evm_address(&wallet.address) {
                warn!("Wallet address looks malformed: {}", wallet);
            }
        }
        for signer in &self.signers {
            if !is_valid_evm_address(&signer.address) {
                warn!(
                    "Signer address for '{}' looks malformed: {}",
                    signer.handle, signer.address
                );
            }
        }
    }
}
