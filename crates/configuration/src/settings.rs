use crate::error::ConfigError;
use core_types::TradingMode;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub defaults: ClientDefaults,
}

/// Where and how to reach the marketplace backend.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST backend, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// The session credentials attached to every request.
///
/// Both tokens are normally injected via environment variables rather than
/// written into `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub access_token: String,
    pub refresh_token: String,
}

/// Client-side defaults applied when the user leaves a field untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientDefaults {
    /// Default wallet currency for balance and limit lookups (e.g. "USDT").
    pub currency: String,
    /// Default market for new bots.
    pub trading_mode: TradingMode,
}

impl Config {
    /// Rejects configurations that could not possibly produce a working client.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "api.base_url must not be empty".to_string(),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
