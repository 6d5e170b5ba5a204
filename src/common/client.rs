use crate::common::{ApiTrait, ClientConfig, MarketDataError};
use async_trait::async_trait;

pub fn create_http_client(config: &ClientConfig) -> Result<reqwest::Client, MarketDataError> {
    Ok(reqwest::Client::builder()
        .timeout(config.timeout)
        .user_agent(config.user_agent.as_str())
        .build()?)
}

/// CoinGecko v3 REST client.
///
/// Stateless apart from the base URL: every query is one independent GET.
/// Query methods live on [`crate::ExchangeDataTrait`] and [`crate::TokenDataTrait`].
#[derive(Debug, Clone)]
pub struct CoinGecko {
    client: reqwest::Client,
    api_base: String,
}

impl CoinGecko {
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default()).expect("Failed to create HTTP client")
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, MarketDataError> {
        let client = create_http_client(&config)?;
        Ok(Self {
            client,
            api_base: config.base_url,
        })
    }

    /// Client with default settings against another root (a mirror, or a mock server in tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, MarketDataError> {
        Self::with_config(ClientConfig::default().with_base_url(base_url))
    }

    /// Client configured from `COINGECKO_*` environment variables.
    pub fn from_env() -> Result<Self, MarketDataError> {
        Self::with_config(ClientConfig::from_env()?)
    }
}

impl Default for CoinGecko {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApiTrait for CoinGecko {
    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn api_name(&self) -> &str {
        "CoinGecko"
    }

    async fn health_check(&self) -> Result<(), MarketDataError> {
        // CoinGecko returns {"gecko_says": "(V3) To the Moon!"}
        let response: serde_json::Value = self.get("ping").await?;

        if response["gecko_says"].is_string() {
            Ok(())
        } else {
            Err(MarketDataError::HealthCheckFailed)
        }
    }
}
