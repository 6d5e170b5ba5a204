//! `coingecko-market-rs`
//!
//! Typed client for the public CoinGecko v3 REST API: token listings and prices,
//! spot and derivatives exchanges, daily closes and historical market charts.
//!
//! ## Quickstart
//!
//! ```no_run
//! use coingecko_market_rs::{CoinGecko, TokenDataTrait};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), coingecko_market_rs::MarketDataError> {
//! let price = CoinGecko::new().get_price_data("bitcoin", "usd", true).await?;
//! println!("{} = {:?} (updated {:?})", price.id, price.current_price, price.last_updated);
//! # Ok(())
//! # }
//! ```
//!
//! ## Exchanges
//!
//! ```no_run
//! use coingecko_market_rs::{CoinGecko, ExchangeDataTrait, spot_pair_price_and_volume};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), coingecko_market_rs::MarketDataError> {
//! let client = CoinGecko::new();
//! let exchanges = client
//!     .get_detailed_exchange_data_list(&["binance", "kraken"])
//!     .await?;
//!
//! for (name, pair) in spot_pair_price_and_volume(&exchanges, "BTC", "USD") {
//!     println!("{} last={:?} volume_btc={:?}", name, pair.last_price, pair.trade_volume_24h_btc);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Listing queries (`list_*`) are best effort and return an empty list on failure;
//! every other query returns a [`MarketDataError`].

pub mod common;
pub mod exchanges;
pub mod tokens;

// Re-export common types
pub use common::{
    ApiTrait, ClientConfig, CoinGecko, ErrorKind, ExchangeDataTrait, MarketDataError,
    TokenDataTrait, epoch_to_time, load_dotenv, time_to_epoch_seconds,
};

pub use exchanges::{
    DerivativesExchangeInfo, DerivativesExchangesSortOrder, DerivativesTickerInfo,
    DetailedDerivativesExchangeData, DetailedExchangeData, ExchangeInfo, SpotPairSnapshot,
    TickerInfo, spot_pair_price_and_volume,
};
pub use tokens::{
    ChartInterval, DatePricePair, HistoricTokenInfo, MarketChart, TokenInfo, TrendingToken,
};
