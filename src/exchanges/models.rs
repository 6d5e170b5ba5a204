use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Spot exchange identity, the input for detail queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeInfo {
    pub id: String,
    pub name: String,
}

/// Summary row of the derivatives exchange listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivativesExchangeInfo {
    pub id: String,
    pub name: String,
    pub open_interest_btc: Option<f64>,
    pub trade_volume_24h_btc: Option<f64>,
    pub number_of_perpetual_pairs: Option<u32>,
    pub number_of_futures_pairs: Option<u32>,
    pub url: Option<String>,
    pub year_established: Option<u32>,
}

/// Spot exchange snapshot with every listed ticker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailedExchangeData {
    pub name: String,
    pub url: Option<String>,
    pub centralized: bool,
    pub trust_score: Option<u32>,
    pub trust_score_rank: Option<u32>,
    pub trade_volume_24h_btc: Option<f64>,
    pub tickers: Vec<TickerInfo>,
}

/// One spot trading pair on an exchange.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickerInfo {
    pub base: String,
    pub target: String,
    pub last_price: Option<f64>,
    /// Volume in base currency units.
    pub volume: Option<f64>,
    pub btc_pair_price: Option<f64>,
    pub eth_pair_price: Option<f64>,
    pub usd_pair_price: Option<f64>,
    pub converted_volume_btc: Option<f64>,
    pub converted_volume_eth: Option<f64>,
    pub converted_volume_usd: Option<f64>,
    pub bid_ask_spread_percentage: Option<f64>,
    pub last_trade_time: Option<DateTime<Local>>,
    pub timestamp: Option<DateTime<Local>>,
    pub coin_id: Option<String>,
}

/// Derivatives exchange snapshot with every unexpired contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailedDerivativesExchangeData {
    pub name: String,
    pub url: Option<String>,
    pub open_interest_btc: Option<f64>,
    pub trade_volume_24h_btc: Option<f64>,
    pub number_of_perpetual_pairs: Option<u32>,
    pub number_of_futures_pairs: Option<u32>,
    pub year_established: Option<u32>,
    pub tickers: Vec<DerivativesTickerInfo>,
}

/// One derivatives contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivativesTickerInfo {
    pub symbol: String,
    pub base: String,
    pub target: String,
    pub trade_url: Option<String>,
    /// "perpetual" or "futures"
    pub contract_type: Option<String>,
    pub price_percentage_change_24h: Option<f64>,
    pub last_price: Option<f64>,
    pub volume_24h: Option<f64>,
    pub btc_pair_price: Option<f64>,
    pub eth_pair_price: Option<f64>,
    pub usd_pair_price: Option<f64>,
    pub converted_volume_btc: Option<f64>,
    pub converted_volume_eth: Option<f64>,
    pub converted_volume_usd: Option<f64>,
    pub bid_ask_spread: Option<f64>,
    pub last_trade_time: Option<DateTime<Local>>,
    pub expiration: Option<DateTime<Local>>,
    pub index_price: Option<f64>,
    pub index_basis_percentage: Option<f64>,
    pub funding_rate: Option<f64>,
}

/// 24h BTC volume of an exchange next to the last price of one of its pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpotPairSnapshot {
    pub trade_volume_24h_btc: Option<f64>,
    /// None when the exchange lists no matching pair.
    pub last_price: Option<f64>,
}

/// Ordering of the derivatives exchange listing.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DerivativesExchangesSortOrder {
    #[default]
    None,
    DescendingByOI,
    DescendingByVolume,
    AscendingByOI,
    AscendingByVolume,
}

impl DerivativesExchangesSortOrder {
    /// Query string appended to `/derivatives/exchanges`; empty for [`Self::None`].
    pub fn sort_order_api_string(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::DescendingByOI => "?order=open_interest_btc_desc",
            Self::DescendingByVolume => "?order=trade_volume_24h_btc_desc",
            Self::AscendingByOI => "?order=open_interest_btc_asc",
            Self::AscendingByVolume => "?order=trade_volume_24h_btc_asc",
        }
    }
}
