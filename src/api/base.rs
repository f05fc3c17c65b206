use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;

/// Something that returns the provider's raw quote payload for a symbol.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_quote(&self, symbol: &str) -> Result<Value, FetchError>;
}
