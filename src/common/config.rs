//! Client configuration: base URL, request timeout and user agent.
//!
//! Values can be overridden from the environment (or a `.env` file):
//! `COINGECKO_API_BASE` and `COINGECKO_TIMEOUT_SECS`.

use crate::common::MarketDataError;
use std::time::Duration;

pub const COINGECKO_API_BASE: &str = "https://api.coingecko.com/api/v3";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_USER_AGENT: &str = concat!("coingecko-market-rs/", env!("CARGO_PKG_VERSION"));

const ENV_API_BASE: &str = "COINGECKO_API_BASE";
const ENV_TIMEOUT_SECS: &str = "COINGECKO_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root of every endpoint, without a trailing slash.
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: COINGECKO_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults, overridden by `COINGECKO_API_BASE` / `COINGECKO_TIMEOUT_SECS` when set.
    /// Loads `.env` first.
    pub fn from_env() -> Result<Self, MarketDataError> {
        load_dotenv();
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var(ENV_API_BASE) {
            if !base_url.trim().is_empty() {
                config = config.with_base_url(base_url);
            }
        }

        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                MarketDataError::ConfigError(format!("Invalid {} value: {}", ENV_TIMEOUT_SECS, raw))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Loads `.env` from the current or project directory. Call before reading env vars (e.g. in tests).
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}
