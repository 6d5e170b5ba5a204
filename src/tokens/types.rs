use crate::common::utils::{de_opt_f64, de_opt_string, de_opt_time, de_opt_u32};
use chrono::{DateTime, Local};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Entry of `/coins/markets`.
#[derive(Debug, Deserialize)]
pub struct MarketsEntry {
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub current_price: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub market_cap: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub market_cap_rank: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub fully_diluted_valuation: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub total_volume: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub high_24h: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub low_24h: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub price_change_24h: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub market_cap_change_24h: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub market_cap_change_percentage_24h: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub circulating_supply: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub total_supply: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub max_supply: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub ath: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub ath_change_percentage: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_time")]
    pub ath_date: Option<DateTime<Local>>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub atl: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub atl_change_percentage: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_time")]
    pub atl_date: Option<DateTime<Local>>,
    #[serde(default, deserialize_with = "de_opt_time")]
    pub last_updated: Option<DateTime<Local>>,
    #[serde(default)]
    pub sparkline_in_7d: Option<Sparkline>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Sparkline {
    #[serde(default)]
    pub price: Vec<Option<f64>>,
}

/// Entry of `/coins/list`.
#[derive(Debug, Deserialize)]
pub struct CoinListEntry {
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub name: Option<String>,
}

/// `/coins/{id}/history` response. `market_data` is absent for dates before listing.
#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    #[serde(default, deserialize_with = "de_opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub name: Option<String>,
    #[serde(default)]
    pub market_data: Option<HistoryMarketData>,
}

/// Currency code -> value maps.
#[derive(Debug, Deserialize)]
pub struct HistoryMarketData {
    #[serde(default)]
    pub current_price: HashMap<String, Value>,
    #[serde(default)]
    pub market_cap: HashMap<String, Value>,
    #[serde(default)]
    pub total_volume: HashMap<String, Value>,
}

/// `/coins/{id}/market_chart` and `/market_chart/range` response: `[epoch_millis, value]` points.
#[derive(Debug, Deserialize)]
pub struct MarketChartResponse {
    #[serde(default)]
    pub prices: Vec<(f64, Option<f64>)>,
    #[serde(default)]
    pub market_caps: Vec<(f64, Option<f64>)>,
    #[serde(default, alias = "volumes")]
    pub total_volumes: Vec<(f64, Option<f64>)>,
}

/// One token of a `/simple/price` response: a value per requested currency,
/// plus `last_updated_at` when asked for.
#[derive(Debug, Deserialize)]
pub struct SimplePriceEntry {
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub last_updated_at: Option<f64>,
    #[serde(flatten)]
    pub quotes: HashMap<String, Value>,
}

pub type SimplePriceResponse = HashMap<String, SimplePriceEntry>;

/// `/search/trending` response.
#[derive(Debug, Deserialize)]
pub struct TrendingResponse {
    #[serde(default)]
    pub coins: Vec<TrendingCoin>,
}

#[derive(Debug, Deserialize)]
pub struct TrendingCoin {
    pub item: TrendingCoinItem,
}

#[derive(Debug, Deserialize)]
pub struct TrendingCoinItem {
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub market_cap_rank: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub thumb: Option<String>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub price_btc: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_u32")]
    pub score: Option<u32>,
}
