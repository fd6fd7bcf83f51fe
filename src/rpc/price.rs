use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::debug;
use serde_json::Value;

pub const DEFAULT_PRICE_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=solana&vs_currencies=usd";
const DEFAULT_ASSET_ID: &str = "solana";
const DEFAULT_QUOTE_CURRENCY: &str = "usd";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Fiat value of one whole native token. Always positive and finite on success.
    async fn native_token_price(&self) -> Result<f64>;
}

/// Price lookup against a CoinGecko-style `simple/price` endpoint, which answers with
/// `{"<asset>": {"<currency>": <price>}}`.
pub struct HttpPriceOracle {
    client: reqwest::Client,
    url: String,
    asset_id: String,
    quote_currency: String,
}

impl HttpPriceOracle {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(HttpPriceOracle {
            client,
            url: url.into(),
            asset_id: DEFAULT_ASSET_ID.to_string(),
            quote_currency: DEFAULT_QUOTE_CURRENCY.to_string(),
        })
    }

    pub fn with_pair(mut self, asset_id: &str, quote_currency: &str) -> Self {
        self.asset_id = asset_id.to_string();
        self.quote_currency = quote_currency.to_string();
        self
    }
}

#[async_trait]
impl PriceOracle for HttpPriceOracle {
    async fn native_token_price(&self) -> Result<f64> {
        let response = match self.client.get(&self.url).send().await {
            Ok(response) => response,
            Err(err) => return Err(anyhow!("fail to send price request: {err}")),
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => return Err(anyhow!("fail to read price response content: {err:#}")),
        };

        if !status.is_success() {
            return Err(anyhow!("price status code: {status}, response: {text}"));
        }

        let price = parse_price(&text, &self.asset_id, &self.quote_currency)?;
        debug!("{}/{} quote: {}", self.asset_id, self.quote_currency, price);
        Ok(price)
    }
}

fn parse_price(body: &str, asset_id: &str, quote_currency: &str) -> Result<f64> {
    let value: Value = serde_json::from_str(body)
        .map_err(|err| anyhow!("fail to deserialize price response: {err:#}"))?;
    let price = value
        .get(asset_id)
        .and_then(|quotes| quotes.get(quote_currency))
        .and_then(Value::as_f64)
        .ok_or_else(|| anyhow!("no {asset_id}/{quote_currency} quote in response: {body}"))?;
    validate_price(price)
}

pub fn validate_price(price: f64) -> Result<f64> {
    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(anyhow!("unusable price quote: {price}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_price_payload() {
        let body = r#"{"solana":{"usd":142.37}}"#;
        assert_eq!(parse_price(body, "solana", "usd").unwrap(), 142.37);
    }

    #[test]
    fn missing_pair_is_an_error() {
        let body = r#"{"solana":{"eur":130.0}}"#;
        assert!(parse_price(body, "solana", "usd").is_err());
        assert!(parse_price("{}", "solana", "usd").is_err());
        assert!(parse_price("<html>rate limited</html>", "solana", "usd").is_err());
    }

    #[test]
    fn non_positive_quotes_are_unusable() {
        assert!(parse_price(r#"{"solana":{"usd":0}}"#, "solana", "usd").is_err());
        assert!(parse_price(r#"{"solana":{"usd":-3.5}}"#, "solana", "usd").is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn custom_pair() {
        let oracle = HttpPriceOracle::new("http://localhost")
            .unwrap()
            .with_pair("bitcoin", "eur");
        assert_eq!(oracle.asset_id, "bitcoin");
        assert_eq!(oracle.quote_currency, "eur");
    }
}
