use crate::common::utils::{de_opt_f64, de_opt_string, de_opt_time, de_opt_u32};
use chrono::{DateTime, Local};
use serde::Deserialize;

/// Entry of `/exchanges/list`.
#[derive(Debug, Deserialize)]
pub struct ExchangeListEntry {
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub name: Option<String>,
}

/// Entry of `/derivatives/exchanges`. `trade_volume_24h_btc` comes back as a string.
#[derive(Debug, Deserialize)]
pub struct DerivativesExchangeEntry {
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub open_interest_btc: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub trade_volume_24h_btc: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub number_of_perpetual_pairs: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub number_of_futures_pairs: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub year_established: Option<u32>,
}

/// `converted_last` / `converted_volume` objects on tickers.
#[derive(Debug, Default, Deserialize)]
pub struct ConvertedValues {
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub btc: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub eth: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub usd: Option<f64>,
}

/// `/exchanges/{id}` response.
#[derive(Debug, Deserialize)]
pub struct ExchangeDetailResponse {
    #[serde(default, deserialize_with = "de_opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub url: Option<String>,
    #[serde(default)]
    pub centralized: Option<bool>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub trust_score: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub trust_score_rank: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub trade_volume_24h_btc: Option<f64>,
    #[serde(default)]
    pub tickers: Option<Vec<SpotTicker>>,
}

#[derive(Debug, Deserialize)]
pub struct SpotTicker {
    #[serde(default, deserialize_with = "de_opt_string")]
    pub base: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub target: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub last: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub volume: Option<f64>,
    #[serde(default)]
    pub converted_last: Option<ConvertedValues>,
    #[serde(default)]
    pub converted_volume: Option<ConvertedValues>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub bid_ask_spread_percentage: Option<f64>,
    // RFC 3339 strings on spot tickers
    #[serde(default, deserialize_with = "de_opt_time")]
    pub last_traded_at: Option<DateTime<Local>>,
    #[serde(default, deserialize_with = "de_opt_time")]
    pub timestamp: Option<DateTime<Local>>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub coin_id: Option<String>,
}

/// `/derivatives/exchanges/{id}` response.
#[derive(Debug, Deserialize)]
pub struct DerivativesExchangeDetailResponse {
    #[serde(default, deserialize_with = "de_opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub open_interest_btc: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub trade_volume_24h_btc: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub number_of_perpetual_pairs: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub number_of_futures_pairs: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub year_established: Option<u32>,
    #[serde(default)]
    pub tickers: Option<Vec<DerivativesTicker>>,
}

#[derive(Debug, Deserialize)]
pub struct DerivativesTicker {
    #[serde(default, deserialize_with = "de_opt_string")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub base: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub target: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub trade_url: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub contract_type: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub h24_percentage_change: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub last: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub h24_volume: Option<f64>,
    #[serde(default)]
    pub converted_last: Option<ConvertedValues>,
    #[serde(default)]
    pub converted_volume: Option<ConvertedValues>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub bid_ask_spread: Option<f64>,
    // Epoch numbers on derivatives tickers
    #[serde(default, deserialize_with = "de_opt_time")]
    pub last_traded_at: Option<DateTime<Local>>,
    #[serde(default, deserialize_with = "de_opt_time")]
    pub expired_at: Option<DateTime<Local>>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub index: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub index_basis_percentage: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub funding_rate: Option<f64>,
}
