use coingecko_market_rs::CoinGecko;
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Starts a mock server and a client pointed at it.
pub async fn mock_client() -> (MockServer, CoinGecko) {
    let server = MockServer::start().await;
    let client = CoinGecko::with_base_url(server.uri()).expect("client should build");
    (server, client)
}

/// Serves `body` for every GET on `endpoint`, whatever the query string.
pub async fn mount_json(server: &MockServer, endpoint: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Serves a bare status code for every GET on `endpoint`.
#[allow(dead_code)]
pub async fn mount_status(server: &MockServer, endpoint: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(status).set_body_string("{\"error\":\"not found\"}"))
        .mount(server)
        .await;
}

/// Query string value of the single request received so far.
#[allow(dead_code)]
pub async fn received_query_param(server: &MockServer, key: &str) -> Option<String> {
    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests[0]
        .url
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
