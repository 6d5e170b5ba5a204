use crate::common::MarketDataError;
use crate::exchanges::{
    DerivativesExchangeInfo, DerivativesExchangesSortOrder, DetailedDerivativesExchangeData,
    DetailedExchangeData, ExchangeInfo,
};
use crate::tokens::{ChartInterval, HistoricTokenInfo, MarketChart, TokenInfo, TrendingToken};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use tracing::trace;

/// Maximum error body length kept in an `HttpStatus` error.
const MAX_ERROR_MESSAGE_LEN: usize = 500;

// Transport helper shared by every query module
#[async_trait]
pub trait ApiTrait: Send + Sync {
    fn api_base(&self) -> &str;
    fn client(&self) -> &reqwest::Client;
    fn api_name(&self) -> &str;

    /// One GET against the fixed endpoint `{api_base}/{endpoint}`, decoded into `T`.
    ///
    /// `endpoint` is used as is. Use [`ApiTrait::get_with_query`] when ids or
    /// currencies from the caller go into the request.
    async fn get<T: for<'de> serde::Deserialize<'de> + Send>(
        &self,
        endpoint: &str,
    ) -> Result<T, MarketDataError> {
        let url = format!(
            "{}/{}",
            self.api_base(),
            endpoint.trim_start_matches('/')
        );
        self.send(self.client().get(&url), endpoint).await
    }

    /// One GET against `{api_base}/{segments...}?{query}`, decoded into `T`.
    ///
    /// Every path segment and query value is percent-encoded, so `/`, `#` or `&`
    /// inside an id cannot change the request.
    async fn get_with_query<T: for<'de> serde::Deserialize<'de> + Send>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, MarketDataError> {
        let url = self.endpoint_url(segments)?;
        let endpoint = segments.join("/");
        self.send(self.client().get(url).query(query), &endpoint).await
    }

    fn endpoint_url(&self, segments: &[&str]) -> Result<reqwest::Url, MarketDataError> {
        let invalid_base = || {
            MarketDataError::ConfigError(format!("invalid API base URL: {}", self.api_base()))
        };

        let mut url = reqwest::Url::parse(self.api_base()).map_err(|_| invalid_base())?;
        url.path_segments_mut()
            .map_err(|_| invalid_base())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends `request` and decodes the body.
    ///
    /// Network failures and non-2xx statuses are transport errors (`TransportError`,
    /// `HttpStatus`); bodies that are not valid JSON, or do not fit `T`, are `ParseError`.
    async fn send<T: for<'de> serde::Deserialize<'de> + Send>(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<T, MarketDataError> {
        let request = request.build()?;
        trace!(api = self.api_name(), url = %request.url(), "sending GET request");
        let response = self.client().execute(request).await?;

        let status = response.status();
        trace!(status = %status, "received HTTP response");

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(MarketDataError::HttpStatus {
                status,
                endpoint: endpoint.to_string(),
                body: error_text.chars().take(MAX_ERROR_MESSAGE_LEN).collect(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Untyped variant of [`ApiTrait::get`].
    async fn fetch_json(&self, endpoint: &str) -> Result<serde_json::Value, MarketDataError> {
        self.get(endpoint).await
    }

    async fn health_check(&self) -> Result<(), MarketDataError>;
}

/// Spot and derivatives exchange queries.
///
/// `list_*` calls are best effort: failures are logged and yield an empty list.
/// Detail calls propagate every failure to the caller.
#[async_trait]
pub trait ExchangeDataTrait: ApiTrait {
    async fn list_exchanges(&self) -> Vec<ExchangeInfo>;

    async fn list_derivatives_exchanges(
        &self,
        order: DerivativesExchangesSortOrder,
    ) -> Vec<DerivativesExchangeInfo>;

    async fn get_detailed_exchange_data(
        &self,
        exchange_id: &str,
    ) -> Result<DetailedExchangeData, MarketDataError>;

    /// Fetches each id in order, one request at a time. The first failure aborts the batch.
    async fn get_detailed_exchange_data_list(
        &self,
        exchange_ids: &[&str],
    ) -> Result<Vec<DetailedExchangeData>, MarketDataError> {
        let mut exchanges = Vec::with_capacity(exchange_ids.len());
        for exchange_id in exchange_ids {
            exchanges.push(self.get_detailed_exchange_data(exchange_id).await?);
        }
        Ok(exchanges)
    }

    async fn get_detailed_derivatives_exchange_data(
        &self,
        exchange_id: &str,
    ) -> Result<DetailedDerivativesExchangeData, MarketDataError>;

    /// Fetches each id in order, one request at a time. The first failure aborts the batch.
    async fn get_detailed_derivatives_exchange_data_list(
        &self,
        exchange_ids: &[&str],
    ) -> Result<Vec<DetailedDerivativesExchangeData>, MarketDataError> {
        let mut exchanges = Vec::with_capacity(exchange_ids.len());
        for exchange_id in exchange_ids {
            exchanges.push(
                self.get_detailed_derivatives_exchange_data(exchange_id)
                    .await?,
            );
        }
        Ok(exchanges)
    }
}

/// Token listings, prices and historical market data.
#[async_trait]
pub trait TokenDataTrait: ApiTrait {
    /// Top tokens by market cap, priced in `target_currency`. `page_size` is clamped to 1..=250.
    async fn list_token_info(
        &self,
        target_currency: &str,
        page_size: u32,
        include_sparkline: bool,
    ) -> Vec<TokenInfo>;

    /// Top 100 tokens in USD, with 7 day sparklines.
    async fn list_top_token_info(&self) -> Vec<TokenInfo> {
        self.list_token_info("usd", 100, true).await
    }

    /// Every token CoinGecko knows about. Only id, name and symbol are set.
    async fn list_all_known_tokens(&self) -> Vec<TokenInfo>;

    /// Daily close snapshot. Future dates are clamped to now.
    ///
    /// A response without market data (token not listed yet at that date) yields
    /// an empty [`HistoricTokenInfo`] instead of an error.
    async fn get_closing_price_from_date(
        &self,
        token_id: &str,
        date: DateTime<Local>,
        target_currencies: &[&str],
    ) -> Result<HistoricTokenInfo, MarketDataError>;

    async fn get_date_price_pairs(
        &self,
        token: &TokenInfo,
        target_currency: &str,
        day_span: u32,
        interval: ChartInterval,
    ) -> Result<MarketChart, MarketDataError>;

    /// Market chart between two instants. `target_currency` defaults to `usd`.
    async fn get_date_price_pairs_in_range(
        &self,
        token: &TokenInfo,
        start: DateTime<Local>,
        end: DateTime<Local>,
        target_currency: Option<&str>,
    ) -> Result<MarketChart, MarketDataError>;

    /// Current price of `token_id` in `target_id`. Only id, current price and
    /// (when requested) last update time are set on the returned record.
    async fn get_price_data(
        &self,
        token_id: &str,
        target_id: &str,
        report_update_time: bool,
    ) -> Result<TokenInfo, MarketDataError>;

    async fn list_trending_tokens(&self) -> Vec<TrendingToken>;
}
