use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::{base::QuoteSource, utils::make_request};
use crate::error::FetchError;

pub struct AlphaVantageClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl AlphaVantageClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub async fn get_quote(&self, symbol: &str) -> Result<Value, FetchError> {
        debug!(symbol, "requesting GLOBAL_QUOTE");
        let params = [
            ("function", "GLOBAL_QUOTE"),
            ("symbol", symbol),
            ("apikey", self.api_key.as_str()),
        ];

        make_request(&self.client, &self.base_url, &params).await
    }
}

#[async_trait]
impl QuoteSource for AlphaVantageClient {
    async fn fetch_quote(&self, symbol: &str) -> Result<Value, FetchError> {
        self.get_quote(symbol).await
    }
}
