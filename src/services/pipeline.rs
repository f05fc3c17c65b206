use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{
    api::{
        QuoteSource,
        normalize::{normalize, provider_message},
    },
    error::SymbolError,
    models::QuoteRecord,
};

/// Wait between consecutive provider calls. The free tier allows 5 calls a minute.
pub const PACING_INTERVAL: Duration = Duration::from_secs(12);

#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, interval: Duration);
}

pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, interval: Duration) {
        tokio::time::sleep(interval).await;
    }
}

#[derive(Debug)]
pub struct SymbolFailure {
    pub symbol: String,
    pub error: SymbolError,
}

#[derive(Debug, Default)]
pub struct Batch {
    pub records: Vec<QuoteRecord>,
    pub failures: Vec<SymbolFailure>,
}

pub struct Pipeline<S, P> {
    source: S,
    pacer: P,
    pacing: Duration,
}

impl<S: QuoteSource, P: Pacer> Pipeline<S, P> {
    pub fn new(source: S, pacer: P) -> Self {
        Self {
            source,
            pacer,
            pacing: PACING_INTERVAL,
        }
    }

    pub async fn process(&self, symbol: &str) -> Result<QuoteRecord, SymbolError> {
        let raw = self.source.fetch_quote(symbol).await?;

        if let Some(notice) = provider_message(&raw) {
            warn!(symbol, notice, "provider returned a notice instead of a quote");
        }

        let record = normalize(symbol, raw)?;
        if !record.has_prices() {
            debug!(symbol, "quote has no prices");
        }

        Ok(record)
    }

    /// Fetches and normalizes each symbol in order, one at a time.
    ///
    /// A failing symbol is logged and left out; the rest of the list still runs.
    /// Consecutive attempts are separated by the pacing interval whatever the
    /// outcome of the previous one.
    pub async fn collect(&self, symbols: &[String]) -> Batch {
        let mut batch = Batch::default();

        for (idx, symbol) in symbols.iter().enumerate() {
            if idx > 0 {
                self.pacer.pause(self.pacing).await;
            }

            match self.process(symbol).await {
                Ok(record) => batch.records.push(record),
                Err(error) => {
                    if error.is_http() {
                        warn!(symbol = symbol.as_str(), %error, "HTTP error fetching symbol");
                    } else {
                        warn!(symbol = symbol.as_str(), %error, "error processing symbol");
                    }
                    batch.failures.push(SymbolFailure {
                        symbol: symbol.clone(),
                        error,
                    });
                }
            }
        }

        batch
    }
}
