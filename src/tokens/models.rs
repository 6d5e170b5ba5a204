use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const PRICE_SERIES: &str = "Price";
pub const MARKET_CAP_SERIES: &str = "Market Cap";
pub const VOLUME_SERIES: &str = "Volume";

/// Market snapshot of one token.
///
/// Listing queries fill every field they receive. `/coins/list` only sets id, symbol
/// and name; simple price queries only set id, current price and last update time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image_url: Option<String>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u32>,
    pub fully_diluted_valuation: Option<f64>,
    pub total_volume: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub price_change_24h: Option<f64>,
    pub market_cap_change_24h: Option<f64>,
    pub market_cap_change_percentage_24h: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
    /// All-time high
    pub ath: Option<f64>,
    pub ath_change_percentage: Option<f64>,
    pub ath_date: Option<DateTime<Local>>,
    /// All-time low
    pub atl: Option<f64>,
    pub atl_change_percentage: Option<f64>,
    pub atl_date: Option<DateTime<Local>>,
    pub last_updated: Option<DateTime<Local>>,
    /// 7 day sparkline, oldest first. Empty unless requested.
    pub price_history_7d: Vec<Option<f64>>,
}

/// Daily close of one token, in each requested currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricTokenInfo {
    pub id: String,
    pub symbol: String,
    pub name: String,
    /// Lowercased, de-duplicated, in request order.
    pub target_currencies: Vec<String>,
    pub price: HashMap<String, Option<f64>>,
    pub market_cap: HashMap<String, Option<f64>>,
    pub volume: HashMap<String, Option<f64>>,
}

impl HistoricTokenInfo {
    /// True for the record returned when the API had no market data for the date.
    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.price.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatePricePair {
    pub time: DateTime<Local>,
    pub value: f64,
}

/// Historical price, market cap and volume series of one token.
///
/// Each series keeps its own length; the API does not guarantee they line up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketChart {
    pub prices: Vec<DatePricePair>,
    pub market_caps: Vec<DatePricePair>,
    pub volumes: Vec<DatePricePair>,
}

impl MarketChart {
    /// The three series keyed "Price", "Market Cap" and "Volume".
    pub fn into_named_series(self) -> HashMap<&'static str, Vec<DatePricePair>> {
        HashMap::from([
            (PRICE_SERIES, self.prices),
            (MARKET_CAP_SERIES, self.market_caps),
            (VOLUME_SERIES, self.volumes),
        ])
    }

    pub fn series(&self, name: &str) -> Option<&[DatePricePair]> {
        match name {
            PRICE_SERIES => Some(&self.prices),
            MARKET_CAP_SERIES => Some(&self.market_caps),
            VOLUME_SERIES => Some(&self.volumes),
            _ => None,
        }
    }
}

/// Granularity of `/market_chart` data. The API coarsens it for long spans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartInterval {
    #[default]
    Daily,
    Hourly,
}

impl ChartInterval {
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Hourly => "hourly",
        }
    }
}

/// Token from the trending search list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendingToken {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub market_cap_rank: Option<u32>,
    pub price_btc: Option<f64>,
    /// Position in the trending list, 0 = hottest.
    pub score: Option<u32>,
    pub thumb: Option<String>,
}
