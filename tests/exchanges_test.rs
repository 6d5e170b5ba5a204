mod common;

use coingecko_market_rs::{
    CoinGecko, DerivativesExchangesSortOrder, DetailedExchangeData, ErrorKind,
    ExchangeDataTrait, MarketDataError, TickerInfo, epoch_to_time, spot_pair_price_and_volume,
};
use common::{mock_client, mount_json, mount_status};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_list_exchanges_preserves_source_order() {
    let (server, client) = mock_client().await;
    mount_json(
        &server,
        "/exchanges/list",
        json!([
            {"id": "binance", "name": "Binance"},
            {"id": "gdax", "name": "Coinbase Exchange"}
        ]),
    )
    .await;

    let exchanges = client.list_exchanges().await;

    assert_eq!(exchanges.len(), 2);
    assert_eq!(exchanges[0].id, "binance");
    assert_eq!(exchanges[0].name, "Binance");
    assert_eq!(exchanges[1].id, "gdax");
    assert_eq!(exchanges[1].name, "Coinbase Exchange");
}

#[tokio::test]
async fn test_list_exchanges_swallows_http_error() {
    let (server, client) = mock_client().await;
    mount_status(&server, "/exchanges/list", 500).await;

    let exchanges = client.list_exchanges().await;
    assert!(exchanges.is_empty(), "failure should yield an empty list");
}

#[tokio::test]
async fn test_list_exchanges_swallows_malformed_body() {
    let (server, client) = mock_client().await;
    Mock::given(method("GET"))
        .and(path("/exchanges/list"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    assert!(client.list_exchanges().await.is_empty());
}

#[tokio::test]
async fn test_list_derivatives_exchanges_sorted_and_lenient() {
    let (server, client) = mock_client().await;
    Mock::given(method("GET"))
        .and(path("/derivatives/exchanges"))
        .and(query_param("order", "open_interest_btc_desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "binance_futures",
                "name": "Binance (Futures)",
                "open_interest_btc": 279958.61,
                "trade_volume_24h_btc": "574366.94",
                "number_of_perpetual_pairs": 330,
                "number_of_futures_pairs": 44,
                "url": "https://www.binance.com/",
                "year_established": 2019
            },
            {
                "id": "tiny_dex",
                "name": "Tiny DEX",
                "open_interest_btc": null,
                "trade_volume_24h_btc": "n/a",
                "year_established": null
            }
        ])))
        .mount(&server)
        .await;

    let exchanges = client
        .list_derivatives_exchanges(DerivativesExchangesSortOrder::DescendingByOI)
        .await;

    assert_eq!(exchanges.len(), 2);

    let binance = &exchanges[0];
    assert_eq!(binance.id, "binance_futures");
    assert_eq!(binance.open_interest_btc, Some(279958.61));
    // Volume arrives as a string
    assert_eq!(binance.trade_volume_24h_btc, Some(574366.94));
    assert_eq!(binance.number_of_perpetual_pairs, Some(330));
    assert_eq!(binance.number_of_futures_pairs, Some(44));
    assert_eq!(binance.year_established, Some(2019));

    let tiny = &exchanges[1];
    assert_eq!(tiny.open_interest_btc, None);
    assert_eq!(tiny.trade_volume_24h_btc, None);
    assert_eq!(tiny.number_of_perpetual_pairs, None);
    assert_eq!(tiny.url, None);
    assert_eq!(tiny.year_established, None);
}

#[test]
fn test_sort_order_api_strings() {
    assert_eq!(DerivativesExchangesSortOrder::None.sort_order_api_string(), "");
    assert_eq!(
        DerivativesExchangesSortOrder::DescendingByOI.sort_order_api_string(),
        "?order=open_interest_btc_desc"
    );
    assert_eq!(
        DerivativesExchangesSortOrder::DescendingByVolume.sort_order_api_string(),
        "?order=trade_volume_24h_btc_desc"
    );
    assert_eq!(
        DerivativesExchangesSortOrder::AscendingByOI.sort_order_api_string(),
        "?order=open_interest_btc_asc"
    );
    assert_eq!(
        DerivativesExchangesSortOrder::AscendingByVolume.sort_order_api_string(),
        "?order=trade_volume_24h_btc_asc"
    );
}

fn kraken_detail() -> serde_json::Value {
    json!({
        "name": "Kraken",
        "url": "https://r.kraken.com/sr",
        "centralized": true,
        "trust_score": 10,
        "trust_score_rank": 2,
        "trade_volume_24h_btc": 9123.45,
        "tickers": [
            {
                "base": "BTC",
                "target": "USD",
                "last": 42010.5,
                "volume": 1520.25,
                "converted_last": {"btc": 1.0, "eth": 18.2, "usd": 42010.5},
                "converted_volume": {"btc": 1520.25, "eth": 27668.5, "usd": 63866000.0},
                "bid_ask_spread_percentage": 0.010238,
                "timestamp": "2024-01-02T03:04:05+00:00",
                "last_traded_at": "2024-01-02T03:04:00+00:00",
                "coin_id": "bitcoin"
            },
            {
                "base": "ETH",
                "target": "EUR",
                "last": 2100.0,
                "volume": null,
                "bid_ask_spread_percentage": null,
                "timestamp": null,
                "coin_id": "ethereum"
            }
        ]
    })
}

#[tokio::test]
async fn test_get_detailed_exchange_data_maps_tickers() {
    let (server, client) = mock_client().await;
    mount_json(&server, "/exchanges/kraken", kraken_detail()).await;

    let exchange = client
        .get_detailed_exchange_data("Kraken")
        .await
        .expect("detail query should succeed");

    assert_eq!(exchange.name, "Kraken");
    assert_eq!(exchange.url.as_deref(), Some("https://r.kraken.com/sr"));
    assert!(exchange.centralized);
    assert_eq!(exchange.trust_score, Some(10));
    assert_eq!(exchange.trust_score_rank, Some(2));
    assert_eq!(exchange.trade_volume_24h_btc, Some(9123.45));
    assert_eq!(exchange.tickers.len(), 2);

    let btc = &exchange.tickers[0];
    assert_eq!(btc.base, "BTC");
    assert_eq!(btc.target, "USD");
    assert_eq!(btc.last_price, Some(42010.5));
    assert_eq!(btc.btc_pair_price, Some(1.0));
    assert_eq!(btc.eth_pair_price, Some(18.2));
    assert_eq!(btc.usd_pair_price, Some(42010.5));
    assert_eq!(btc.converted_volume_usd, Some(63866000.0));
    assert_eq!(btc.bid_ask_spread_percentage, Some(0.010238));
    assert_eq!(btc.coin_id.as_deref(), Some("bitcoin"));
    assert_eq!(
        btc.timestamp.map(|t| t.timestamp()),
        Some(1704164645),
        "RFC 3339 timestamp should be decoded"
    );
    assert_eq!(btc.last_trade_time.map(|t| t.timestamp()), Some(1704164640));

    let eth = &exchange.tickers[1];
    assert_eq!(eth.volume, None);
    assert_eq!(eth.btc_pair_price, None);
    assert_eq!(eth.bid_ask_spread_percentage, None);
    assert_eq!(eth.timestamp, None);
    assert_eq!(eth.last_trade_time, None);
}

#[tokio::test]
async fn test_get_detailed_exchange_data_propagates_not_found() {
    let (server, client) = mock_client().await;
    mount_status(&server, "/exchanges/nope", 404).await;

    match client.get_detailed_exchange_data("nope").await {
        Err(e @ MarketDataError::HttpStatus { .. }) => {
            assert_eq!(e.kind(), ErrorKind::Transport);
            assert_eq!(e.status().map(|s| s.as_u16()), Some(404));
            let msg = e.to_string();
            assert!(msg.contains("exchanges/nope"), "endpoint should be reported: {}", msg);
            assert!(msg.contains("not found"), "body should be reported: {}", msg);
        }
        other => panic!("Expected HttpStatus, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_exchange_id_is_percent_encoded_in_path() {
    let (server, client) = mock_client().await;
    mount_json(
        &server,
        "/exchanges/odd%2Fid%23x",
        json!({"name": "Odd", "tickers": []}),
    )
    .await;

    let exchange = client
        .get_detailed_exchange_data("odd/id#x")
        .await
        .expect("encoded id should reach the mocked endpoint");
    assert_eq!(exchange.name, "Odd");
}

#[tokio::test]
async fn test_get_detailed_exchange_data_reports_parse_error() {
    let (server, client) = mock_client().await;
    Mock::given(method("GET"))
        .and(path("/exchanges/kraken"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"name\": \"Kraken\""))
        .mount(&server)
        .await;

    let result = client.get_detailed_exchange_data("kraken").await;
    assert!(
        matches!(result, Err(MarketDataError::ParseError(_))),
        "truncated JSON should be a parse error, got: {:?}",
        result
    );
}

#[tokio::test]
async fn test_get_detailed_exchange_data_rejects_empty_id() {
    let client = CoinGecko::with_base_url("http://127.0.0.1:9").expect("client should build");

    let result = client.get_detailed_exchange_data("   ").await;
    assert!(matches!(result, Err(MarketDataError::InvalidArgument(_))));
}

#[tokio::test]
async fn test_get_detailed_exchange_data_list_keeps_order() {
    let (server, client) = mock_client().await;
    mount_json(&server, "/exchanges/kraken", kraken_detail()).await;
    mount_json(
        &server,
        "/exchanges/binance",
        json!({"name": "Binance", "centralized": true, "tickers": []}),
    )
    .await;

    let exchanges = client
        .get_detailed_exchange_data_list(&["binance", "kraken"])
        .await
        .expect("batch should succeed");

    let names: Vec<&str> = exchanges.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Binance", "Kraken"]);
    assert!(exchanges[0].tickers.is_empty());
    assert_eq!(exchanges[0].trust_score, None);
}

#[tokio::test]
async fn test_get_detailed_exchange_data_list_fails_fast() {
    let (server, client) = mock_client().await;
    mount_json(&server, "/exchanges/kraken", kraken_detail()).await;
    mount_status(&server, "/exchanges/missing", 404).await;

    let result = client
        .get_detailed_exchange_data_list(&["kraken", "missing", "kraken"])
        .await;
    assert!(result.is_err(), "one failing id should fail the batch");

    // The third id is never requested
    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_get_detailed_derivatives_exchange_data_converts_epochs() {
    let (server, client) = mock_client().await;
    mount_json(
        &server,
        "/derivatives/exchanges/bitmex",
        json!({
            "name": "BitMEX (Derivatives)",
            "open_interest_btc": 12000.5,
            "trade_volume_24h_btc": "4500.25",
            "number_of_perpetual_pairs": 12,
            "number_of_futures_pairs": 7,
            "year_established": 2014,
            "url": "https://www.bitmex.com/",
            "tickers": [
                {
                    "symbol": "XBTUSD",
                    "base": "BTC",
                    "target": "USD",
                    "trade_url": "https://www.bitmex.com/app/trade/XBTUSD",
                    "contract_type": "perpetual",
                    "last": 42000.0,
                    "h24_percentage_change": -1.25,
                    "index": 41990.12,
                    "index_basis_percentage": 0.024,
                    "bid_ask_spread": 0.0001,
                    "funding_rate": 0.01,
                    "h24_volume": 350000000.0,
                    "converted_volume": {"btc": "8333.3", "eth": "150000.1", "usd": "350000000"},
                    "converted_last": {"btc": "1.0", "eth": "18.0", "usd": "42000.0"},
                    "last_traded_at": 1700000000,
                    "expired_at": null
                },
                {
                    "symbol": "XBTZ24",
                    "base": "BTC",
                    "target": "USD",
                    "contract_type": "futures",
                    "last": 43000.0,
                    "funding_rate": null,
                    "last_traded_at": 1700000000000u64,
                    "expired_at": 1735286400
                }
            ]
        }),
    )
    .await;

    let exchange = client
        .get_detailed_derivatives_exchange_data("bitmex")
        .await
        .expect("derivatives detail should succeed");

    assert_eq!(exchange.name, "BitMEX (Derivatives)");
    assert_eq!(exchange.trade_volume_24h_btc, Some(4500.25));
    assert_eq!(exchange.number_of_perpetual_pairs, Some(12));
    assert_eq!(exchange.year_established, Some(2014));
    assert_eq!(exchange.tickers.len(), 2);

    let perp = &exchange.tickers[0];
    assert_eq!(perp.symbol, "XBTUSD");
    assert_eq!(perp.contract_type.as_deref(), Some("perpetual"));
    assert_eq!(perp.price_percentage_change_24h, Some(-1.25));
    assert_eq!(perp.index_price, Some(41990.12));
    assert_eq!(perp.funding_rate, Some(0.01));
    assert_eq!(perp.usd_pair_price, Some(42000.0));
    assert_eq!(perp.converted_volume_btc, Some(8333.3));
    assert_eq!(perp.last_trade_time, epoch_to_time(1700000000.0));
    assert_eq!(perp.expiration, None);

    let future = &exchange.tickers[1];
    assert_eq!(future.funding_rate, None);
    // Milliseconds and seconds land on the same instant
    assert_eq!(future.last_trade_time, perp.last_trade_time);
    assert_eq!(future.expiration.map(|t| t.timestamp()), Some(1735286400));
}

#[tokio::test]
async fn test_get_detailed_derivatives_exchange_data_list_fails_fast() {
    let (server, client) = mock_client().await;
    mount_status(&server, "/derivatives/exchanges/gone", 404).await;

    let result = client
        .get_detailed_derivatives_exchange_data_list(&["gone", "bitmex"])
        .await;
    assert!(result.is_err());

    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
}

fn exchange_with(name: &str, volume: Option<f64>, tickers: &[(&str, &str, f64)]) -> DetailedExchangeData {
    DetailedExchangeData {
        name: name.to_string(),
        trade_volume_24h_btc: volume,
        tickers: tickers
            .iter()
            .map(|(base, target, last)| TickerInfo {
                base: base.to_string(),
                target: target.to_string(),
                last_price: Some(*last),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

#[test]
fn test_spot_pair_price_and_volume_matches_base_and_target_prefix() {
    let exchanges = vec![
        exchange_with(
            "Binance",
            Some(500_000.0),
            &[("ETH", "USDT", 2200.0), ("BTC", "USDT", 42001.0), ("BTC", "USD", 41999.0)],
        ),
        exchange_with("Kraken", Some(9_000.0), &[("BTC", "EUR", 39000.0)]),
    ];

    let pairs = spot_pair_price_and_volume(&exchanges, "btc", "usd");
    assert_eq!(pairs.len(), 2);

    let binance = pairs.get("Binance").expect("Binance entry");
    // First matching ticker wins; USDT starts with USD
    assert_eq!(binance.last_price, Some(42001.0));
    assert_eq!(binance.trade_volume_24h_btc, Some(500_000.0));

    let kraken = pairs.get("Kraken").expect("Kraken entry");
    assert_eq!(kraken.last_price, None, "no BTC/USD* ticker on Kraken");
    assert_eq!(kraken.trade_volume_24h_btc, Some(9_000.0));
}

#[test]
fn test_spot_pair_price_and_volume_without_matches_has_no_prices() {
    let exchanges = vec![
        exchange_with("A", Some(1.0), &[("ETH", "BTC", 0.05)]),
        exchange_with("B", None, &[]),
    ];

    let pairs = spot_pair_price_and_volume(&exchanges, "BTC", "USD");
    assert!(pairs.values().all(|pair| pair.last_price.is_none()));
    assert_eq!(pairs["B"].trade_volume_24h_btc, None);
}
