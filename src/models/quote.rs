use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use serde_json::Value;

/// One normalized quote, persisted as one row of the target table.
///
/// Only `symbol` is guaranteed. Prices and volume stay `None` when the
/// provider omitted them or sent something unparsable; nothing is cross-checked.
#[derive(Clone, Debug, PartialEq, Getters, new)]
pub struct QuoteRecord {
    symbol: String,
    fetched_at: DateTime<Utc>,
    open: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    close: Option<f64>,
    volume: Option<i64>,
    raw: Value,
}

impl QuoteRecord {
    pub fn has_prices(&self) -> bool {
        self.open.is_some() || self.high.is_some() || self.low.is_some() || self.close.is_some()
    }
}
