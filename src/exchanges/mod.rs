//! Spot and derivatives exchange queries.

mod models;
mod types;

use crate::common::{ApiTrait, CoinGecko, ExchangeDataTrait, MarketDataError, require_id};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{instrument, trace, warn};
use types::{
    ConvertedValues, DerivativesExchangeDetailResponse, DerivativesExchangeEntry,
    DerivativesTicker, ExchangeDetailResponse, ExchangeListEntry, SpotTicker,
};

pub use models::{
    DerivativesExchangeInfo, DerivativesExchangesSortOrder, DerivativesTickerInfo,
    DetailedDerivativesExchangeData, DetailedExchangeData, ExchangeInfo, SpotPairSnapshot,
    TickerInfo,
};

const DERIVATIVES_TICKER_FILTER: &str = "['all', 'unexpired']";

#[async_trait]
impl ExchangeDataTrait for CoinGecko {
    #[instrument(skip(self), level = "trace")]
    async fn list_exchanges(&self) -> Vec<ExchangeInfo> {
        match self.get::<Vec<ExchangeListEntry>>("exchanges/list").await {
            Ok(entries) => entries.into_iter().map(ExchangeInfo::from).collect(),
            Err(e) => {
                warn!(error = %e, "exchange list unavailable, returning empty list");
                Vec::new()
            }
        }
    }

    #[instrument(skip(self), level = "trace")]
    async fn list_derivatives_exchanges(
        &self,
        order: DerivativesExchangesSortOrder,
    ) -> Vec<DerivativesExchangeInfo> {
        let endpoint = format!("derivatives/exchanges{}", order.sort_order_api_string());

        match self.get::<Vec<DerivativesExchangeEntry>>(&endpoint).await {
            Ok(entries) => entries
                .into_iter()
                .map(DerivativesExchangeInfo::from)
                .collect(),
            Err(e) => {
                warn!(error = %e, "derivatives exchange list unavailable, returning empty list");
                Vec::new()
            }
        }
    }

    #[instrument(skip(self), level = "trace")]
    async fn get_detailed_exchange_data(
        &self,
        exchange_id: &str,
    ) -> Result<DetailedExchangeData, MarketDataError> {
        let exchange_id = require_id(exchange_id, "Exchange id")?;
        let response: ExchangeDetailResponse = self
            .get_with_query(&["exchanges", exchange_id.as_str()], &[])
            .await?;
        let exchange = DetailedExchangeData::from(response);
        trace!(tickers = exchange.tickers.len(), "mapped exchange detail");

        Ok(exchange)
    }

    #[instrument(skip(self), level = "trace")]
    async fn get_detailed_derivatives_exchange_data(
        &self,
        exchange_id: &str,
    ) -> Result<DetailedDerivativesExchangeData, MarketDataError> {
        let exchange_id = require_id(exchange_id, "Exchange id")?;
        let query = [("include_tickers", DERIVATIVES_TICKER_FILTER.to_string())];

        let response: DerivativesExchangeDetailResponse = self
            .get_with_query(&["derivatives", "exchanges", exchange_id.as_str()], &query)
            .await?;
        let exchange = DetailedDerivativesExchangeData::from(response);
        trace!(tickers = exchange.tickers.len(), "mapped derivatives exchange detail");

        Ok(exchange)
    }
}

/// Last price of the `base`/`target` pair on each exchange, next to the exchange's 24h BTC volume.
///
/// The first ticker whose base equals `base` and whose target starts with `target`
/// (both case-insensitive) is used, so `target = "USD"` also matches `USDT`.
/// Keyed by exchange name; a later exchange with the same name replaces an earlier one.
pub fn spot_pair_price_and_volume(
    exchanges: &[DetailedExchangeData],
    base: &str,
    target: &str,
) -> HashMap<String, SpotPairSnapshot> {
    let base = base.trim().to_uppercase();
    let target = target.trim().to_uppercase();

    exchanges
        .iter()
        .map(|exchange| {
            let last_price = exchange
                .tickers
                .iter()
                .find(|ticker| {
                    ticker.base.to_uppercase() == base
                        && ticker.target.to_uppercase().starts_with(&target)
                })
                .and_then(|ticker| ticker.last_price);

            (
                exchange.name.clone(),
                SpotPairSnapshot {
                    trade_volume_24h_btc: exchange.trade_volume_24h_btc,
                    last_price,
                },
            )
        })
        .collect()
}

impl From<ExchangeListEntry> for ExchangeInfo {
    fn from(entry: ExchangeListEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name.unwrap_or_default(),
        }
    }
}

impl From<DerivativesExchangeEntry> for DerivativesExchangeInfo {
    fn from(entry: DerivativesExchangeEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name.unwrap_or_default(),
            open_interest_btc: entry.open_interest_btc,
            trade_volume_24h_btc: entry.trade_volume_24h_btc,
            number_of_perpetual_pairs: entry.number_of_perpetual_pairs,
            number_of_futures_pairs: entry.number_of_futures_pairs,
            url: entry.url,
            year_established: entry.year_established,
        }
    }
}

impl From<ExchangeDetailResponse> for DetailedExchangeData {
    fn from(response: ExchangeDetailResponse) -> Self {
        Self {
            name: response.name.unwrap_or_default(),
            url: response.url,
            centralized: response.centralized.unwrap_or_default(),
            trust_score: response.trust_score,
            trust_score_rank: response.trust_score_rank,
            trade_volume_24h_btc: response.trade_volume_24h_btc,
            tickers: response
                .tickers
                .unwrap_or_default()
                .into_iter()
                .map(TickerInfo::from)
                .collect(),
        }
    }
}

impl From<SpotTicker> for TickerInfo {
    fn from(ticker: SpotTicker) -> Self {
        let converted_last = ticker.converted_last.unwrap_or_default();
        let converted_volume = ticker.converted_volume.unwrap_or_default();

        Self {
            base: ticker.base.unwrap_or_default(),
            target: ticker.target.unwrap_or_default(),
            last_price: ticker.last,
            volume: ticker.volume,
            btc_pair_price: converted_last.btc,
            eth_pair_price: converted_last.eth,
            usd_pair_price: converted_last.usd,
            converted_volume_btc: converted_volume.btc,
            converted_volume_eth: converted_volume.eth,
            converted_volume_usd: converted_volume.usd,
            bid_ask_spread_percentage: ticker.bid_ask_spread_percentage,
            last_trade_time: ticker.last_traded_at,
            timestamp: ticker.timestamp,
            coin_id: ticker.coin_id,
        }
    }
}

impl From<DerivativesExchangeDetailResponse> for DetailedDerivativesExchangeData {
    fn from(response: DerivativesExchangeDetailResponse) -> Self {
        Self {
            name: response.name.unwrap_or_default(),
            url: response.url,
            open_interest_btc: response.open_interest_btc,
            trade_volume_24h_btc: response.trade_volume_24h_btc,
            number_of_perpetual_pairs: response.number_of_perpetual_pairs,
            number_of_futures_pairs: response.number_of_futures_pairs,
            year_established: response.year_established,
            tickers: response
                .tickers
                .unwrap_or_default()
                .into_iter()
                .map(DerivativesTickerInfo::from)
                .collect(),
        }
    }
}

impl From<DerivativesTicker> for DerivativesTickerInfo {
    fn from(ticker: DerivativesTicker) -> Self {
        let ConvertedValues {
            btc: btc_pair_price,
            eth: eth_pair_price,
            usd: usd_pair_price,
        } = ticker.converted_last.unwrap_or_default();
        let converted_volume = ticker.converted_volume.unwrap_or_default();

        Self {
            symbol: ticker.symbol.unwrap_or_default(),
            base: ticker.base.unwrap_or_default(),
            target: ticker.target.unwrap_or_default(),
            trade_url: ticker.trade_url,
            contract_type: ticker.contract_type,
            price_percentage_change_24h: ticker.h24_percentage_change,
            last_price: ticker.last,
            volume_24h: ticker.h24_volume,
            btc_pair_price,
            eth_pair_price,
            usd_pair_price,
            converted_volume_btc: converted_volume.btc,
            converted_volume_eth: converted_volume.eth,
            converted_volume_usd: converted_volume.usd,
            bid_ask_spread: ticker.bid_ask_spread,
            last_trade_time: ticker.last_traded_at,
            expiration: ticker.expired_at,
            index_price: ticker.index,
            index_basis_percentage: ticker.index_basis_percentage,
            funding_rate: ticker.funding_rate,
        }
    }
}
