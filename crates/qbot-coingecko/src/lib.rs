//! CoinGecko adapter (price lookup).
//!
//! Uses the public `simple/price` endpoint. One request per lookup, no retries.

use std::time::Duration;

use async_trait::async_trait;

use qbot_core::{
    config::DEFAULT_COINGECKO_BASE_URL,
    errors::Error,
    ports::{PriceError, PriceSource},
    Result,
};

#[derive(Clone, Debug)]
pub struct CoinGeckoClient {
    base_url: String,
    http: reqwest::Client,
}

impl CoinGeckoClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let http = builder
            .build()
            .map_err(|e| Error::External(format!("coingecko client build failed: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn public() -> Result<Self> {
        Self::new(DEFAULT_COINGECKO_BASE_URL, None)
    }
}

#[async_trait]
impl PriceSource for CoinGeckoClient {
    async fn usd_price(&self, coin_id: &str) -> std::result::Result<String, PriceError> {
        let resp = self
            .http
            .get(format!("{}/api/v3/simple/price", self.base_url))
            .query(&[("ids", coin_id), ("vs_currencies", "usd")])
            .send()
            .await
            .map_err(|e| PriceError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PriceError::Status(status.as_u16()));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| PriceError::Decode(e.to_string()))?;

        extract_usd(&body, coin_id)
    }
}

/// Pull `body[coin_id].usd` out of a `simple/price` response as `"$<value>"`.
fn extract_usd(body: &serde_json::Value, coin_id: &str) -> std::result::Result<String, PriceError> {
    let usd = body
        .get(coin_id)
        .and_then(|coin| coin.get("usd"))
        .ok_or_else(|| PriceError::UnknownCoin(coin_id.to_string()))?;

    match usd {
        serde_json::Value::Number(n) => Ok(format!("${n}")),
        serde_json::Value::String(s) => Ok(format!("${s}")),
        _ => Err(PriceError::Decode(format!(
            "usd price for '{coin_id}' is not a number"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn extracts_integer_and_float_prices() {
        let body = json!({"bitcoin": {"usd": 67000}, "dogecoin": {"usd": 0.1234}});
        assert_eq!(extract_usd(&body, "bitcoin").unwrap(), "$67000");
        assert_eq!(extract_usd(&body, "dogecoin").unwrap(), "$0.1234");
    }

    #[test]
    fn missing_coin_or_usd_key_is_unknown_coin() {
        let body = json!({"bitcoin": {"eur": 61000}});
        assert_eq!(
            extract_usd(&body, "bitcoin"),
            Err(PriceError::UnknownCoin("bitcoin".to_string()))
        );
        assert_eq!(
            extract_usd(&json!({}), "doesnotexist"),
            Err(PriceError::UnknownCoin("doesnotexist".to_string()))
        );
    }

    #[tokio::test]
    async fn fetches_price_from_simple_price_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/simple/price"))
            .and(query_param("ids", "ethereum"))
            .and(query_param("vs_currencies", "usd"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"ethereum": {"usd": 3150.42}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = CoinGeckoClient::new(server.uri(), None).unwrap();
        assert_eq!(client.usd_price("ethereum").await.unwrap(), "$3150.42");
    }

    #[tokio::test]
    async fn unknown_coin_returns_typed_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/simple/price"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = CoinGeckoClient::new(server.uri(), None).unwrap();
        assert_eq!(
            client.usd_price("doesnotexist").await,
            Err(PriceError::UnknownCoin("doesnotexist".to_string()))
        );
    }

    #[tokio::test]
    async fn http_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let client = CoinGeckoClient::new(server.uri(), None).unwrap();
        assert_eq!(
            client.usd_price("bitcoin").await,
            Err(PriceError::Status(429))
        );
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = CoinGeckoClient::new(server.uri(), None).unwrap();
        assert!(matches!(
            client.usd_price("bitcoin").await,
            Err(PriceError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let client = CoinGeckoClient::new("http://127.0.0.1:1", None).unwrap();
        assert!(matches!(
            client.usd_price("bitcoin").await,
            Err(PriceError::Transport(_))
        ));
    }
}
