//! Token listings, simple prices, daily closes and market charts.

mod models;
mod types;

use crate::common::utils::value_to_f64;
use crate::common::{
    ApiTrait, CoinGecko, MarketDataError, TokenDataTrait, clamp_to_now, epoch_to_time,
    format_history_date, normalize_id, require_id, time_to_epoch_seconds,
};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{instrument, trace, warn};
use types::{
    CoinListEntry, HistoryResponse, MarketChartResponse, MarketsEntry, SimplePriceResponse,
    TrendingResponse,
};

pub use models::{
    ChartInterval, DatePricePair, HistoricTokenInfo, MARKET_CAP_SERIES, MarketChart,
    PRICE_SERIES, TokenInfo, TrendingToken, VOLUME_SERIES,
};

const MAX_PAGE_SIZE: u32 = 250;
const DEFAULT_TARGET_CURRENCY: &str = "usd";

#[async_trait]
impl TokenDataTrait for CoinGecko {
    #[instrument(skip(self), level = "trace")]
    async fn list_token_info(
        &self,
        target_currency: &str,
        page_size: u32,
        include_sparkline: bool,
    ) -> Vec<TokenInfo> {
        let query = [
            ("vs_currency", normalize_id(target_currency)),
            ("order", "market_cap_desc".to_string()),
            ("per_page", page_size.clamp(1, MAX_PAGE_SIZE).to_string()),
            ("page", "1".to_string()),
            ("sparkline", include_sparkline.to_string()),
        ];

        match self
            .get_with_query::<Vec<MarketsEntry>>(&["coins", "markets"], &query)
            .await
        {
            Ok(entries) => entries.into_iter().map(TokenInfo::from).collect(),
            Err(e) => {
                warn!(error = %e, "token market listing unavailable, returning empty list");
                Vec::new()
            }
        }
    }

    #[instrument(skip(self), level = "trace")]
    async fn list_all_known_tokens(&self) -> Vec<TokenInfo> {
        match self.get::<Vec<CoinListEntry>>("coins/list").await {
            Ok(entries) => entries
                .into_iter()
                .map(|entry| TokenInfo {
                    id: entry.id,
                    symbol: entry.symbol.unwrap_or_default(),
                    name: entry.name.unwrap_or_default(),
                    ..Default::default()
                })
                .collect(),
            Err(e) => {
                warn!(error = %e, "token list unavailable, returning empty list");
                Vec::new()
            }
        }
    }

    #[instrument(skip(self), level = "trace")]
    async fn get_closing_price_from_date(
        &self,
        token_id: &str,
        date: DateTime<Local>,
        target_currencies: &[&str],
    ) -> Result<HistoricTokenInfo, MarketDataError> {
        let token_id = require_id(token_id, "Token id")?;
        let date = clamp_to_now(date);
        let query = [("date", format_history_date(&date))];

        let response: HistoryResponse = self
            .get_with_query(&["coins", token_id.as_str(), "history"], &query)
            .await?;
        let Some(market_data) = response.market_data else {
            warn!(token_id = %token_id, date = %date, "no market data for this date");
            return Ok(HistoricTokenInfo::default());
        };

        let target_currencies = dedup_currencies(target_currencies);
        let lookup = |values: &HashMap<String, Value>| -> HashMap<String, Option<f64>> {
            target_currencies
                .iter()
                .map(|currency| {
                    (
                        currency.clone(),
                        values.get(currency).and_then(value_to_f64),
                    )
                })
                .collect()
        };

        let price = lookup(&market_data.current_price);
        let market_cap = lookup(&market_data.market_cap);
        let volume = lookup(&market_data.total_volume);

        Ok(HistoricTokenInfo {
            id: response.id.unwrap_or(token_id),
            symbol: response.symbol.unwrap_or_default(),
            name: response.name.unwrap_or_default(),
            target_currencies,
            price,
            market_cap,
            volume,
        })
    }

    #[instrument(skip(self, token), fields(token_id = %token.id), level = "trace")]
    async fn get_date_price_pairs(
        &self,
        token: &TokenInfo,
        target_currency: &str,
        day_span: u32,
        interval: ChartInterval,
    ) -> Result<MarketChart, MarketDataError> {
        let token_id = require_id(&token.id, "Token id")?;
        let query = [
            ("vs_currency", normalize_id(target_currency)),
            ("days", day_span.to_string()),
            ("interval", interval.as_api_str().to_string()),
        ];

        let response: MarketChartResponse = self
            .get_with_query(&["coins", token_id.as_str(), "market_chart"], &query)
            .await?;
        Ok(MarketChart::from(response))
    }

    #[instrument(skip(self, token), fields(token_id = %token.id), level = "trace")]
    async fn get_date_price_pairs_in_range(
        &self,
        token: &TokenInfo,
        start: DateTime<Local>,
        end: DateTime<Local>,
        target_currency: Option<&str>,
    ) -> Result<MarketChart, MarketDataError> {
        let token_id = require_id(&token.id, "Token id")?;
        let target_currency = normalize_id(target_currency.unwrap_or(DEFAULT_TARGET_CURRENCY));
        let query = [
            ("vs_currency", target_currency),
            ("from", time_to_epoch_seconds(&start).to_string()),
            ("to", time_to_epoch_seconds(&end).to_string()),
        ];

        let response: MarketChartResponse = self
            .get_with_query(&["coins", token_id.as_str(), "market_chart", "range"], &query)
            .await?;
        Ok(MarketChart::from(response))
    }

    #[instrument(skip(self), level = "trace")]
    async fn get_price_data(
        &self,
        token_id: &str,
        target_id: &str,
        report_update_time: bool,
    ) -> Result<TokenInfo, MarketDataError> {
        let token_id = require_id(token_id, "Token id")?;
        let target_id = require_id(target_id, "Target currency")?;
        let query = [
            ("ids", token_id.clone()),
            ("vs_currencies", target_id.clone()),
            ("include_last_updated_at", report_update_time.to_string()),
        ];

        let response: SimplePriceResponse = self
            .get_with_query(&["simple", "price"], &query)
            .await?;
        let entry = response.get(&token_id).ok_or_else(|| {
            MarketDataError::ApiError(format!("no price returned for token: {}", token_id))
        })?;

        let current_price = entry.quotes.get(&target_id).and_then(value_to_f64);
        let last_updated = if report_update_time {
            entry.last_updated_at.and_then(epoch_to_time)
        } else {
            None
        };
        trace!(?current_price, ?last_updated, "mapped simple price");

        Ok(TokenInfo {
            id: token_id,
            current_price,
            last_updated,
            ..Default::default()
        })
    }

    #[instrument(skip(self), level = "trace")]
    async fn list_trending_tokens(&self) -> Vec<TrendingToken> {
        match self.get::<TrendingResponse>("search/trending").await {
            Ok(response) => response
                .coins
                .into_iter()
                .map(|coin| TrendingToken {
                    id: coin.item.id,
                    name: coin.item.name.unwrap_or_default(),
                    symbol: coin.item.symbol.unwrap_or_default(),
                    market_cap_rank: coin.item.market_cap_rank,
                    price_btc: coin.item.price_btc,
                    score: coin.item.score,
                    thumb: coin.item.thumb,
                })
                .collect(),
            Err(e) => {
                warn!(error = %e, "trending list unavailable, returning empty list");
                Vec::new()
            }
        }
    }
}

// Lowercase, trim, drop empties and repeats, keep first-seen order
fn dedup_currencies(currencies: &[&str]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(currencies.len());
    for currency in currencies {
        let currency = normalize_id(currency);
        if !currency.is_empty() && !unique.contains(&currency) {
            unique.push(currency);
        }
    }
    unique
}

// Points with a null value or an out-of-range timestamp are dropped
fn to_date_pairs(points: Vec<(f64, Option<f64>)>) -> Vec<DatePricePair> {
    points
        .into_iter()
        .filter_map(|(timestamp, value)| {
            Some(DatePricePair {
                time: epoch_to_time(timestamp)?,
                value: value?,
            })
        })
        .collect()
}

impl From<MarketChartResponse> for MarketChart {
    fn from(response: MarketChartResponse) -> Self {
        Self {
            prices: to_date_pairs(response.prices),
            market_caps: to_date_pairs(response.market_caps),
            volumes: to_date_pairs(response.total_volumes),
        }
    }
}

impl From<MarketsEntry> for TokenInfo {
    fn from(entry: MarketsEntry) -> Self {
        Self {
            id: entry.id,
            symbol: entry.symbol.unwrap_or_default(),
            name: entry.name.unwrap_or_default(),
            image_url: entry.image,
            current_price: entry.current_price,
            market_cap: entry.market_cap,
            market_cap_rank: entry.market_cap_rank,
            fully_diluted_valuation: entry.fully_diluted_valuation,
            total_volume: entry.total_volume,
            high_24h: entry.high_24h,
            low_24h: entry.low_24h,
            price_change_24h: entry.price_change_24h,
            market_cap_change_24h: entry.market_cap_change_24h,
            market_cap_change_percentage_24h: entry.market_cap_change_percentage_24h,
            circulating_supply: entry.circulating_supply,
            total_supply: entry.total_supply,
            max_supply: entry.max_supply,
            ath: entry.ath,
            ath_change_percentage: entry.ath_change_percentage,
            ath_date: entry.ath_date,
            atl: entry.atl,
            atl_change_percentage: entry.atl_change_percentage,
            atl_date: entry.atl_date,
            last_updated: entry.last_updated,
            price_history_7d: entry
                .sparkline_in_7d
                .map(|sparkline| sparkline.price)
                .unwrap_or_default(),
        }
    }
}
