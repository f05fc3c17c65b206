use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::{Map, Value};

use super::utils::{get_field, is_blank, safe_float, safe_int};
use crate::{
    error::{NormalizeError, json_kind},
    models::QuoteRecord,
};

pub const QUOTE_CONTAINER: &str = "Global Quote";

const OPEN: &str = "02. open";
const HIGH: &str = "03. high";
const LOW: &str = "04. low";
const PRICE: &str = "05. price";
const VOLUME: &str = "06. volume";
const LATEST_TRADING_DAY: &str = "07. latest trading day";

// Alpha Vantage answers 200 with one of these instead of a quote when it
// throttles or rejects a request.
const PROVIDER_MESSAGE_KEYS: [&str; 3] = ["Note", "Information", "Error Message"];

pub fn normalize(symbol: &str, raw: Value) -> Result<QuoteRecord, NormalizeError> {
    normalize_at(symbol, raw, Utc::now())
}

/// Builds a [`QuoteRecord`] from a GLOBAL_QUOTE payload.
///
/// A missing or empty quote container yields a record with every numeric field
/// unset. A payload that is not an object, a container that is not an object,
/// or an unreadable trading day is an error. `now` stands in for the trading
/// day when the provider leaves it out.
pub fn normalize_at(
    symbol: &str,
    raw: Value,
    now: DateTime<Utc>,
) -> Result<QuoteRecord, NormalizeError> {
    let data = raw
        .as_object()
        .ok_or_else(|| NormalizeError::Shape(json_kind(&raw)))?;

    let empty = Map::new();
    let quote = match data.get(QUOTE_CONTAINER) {
        Some(Value::Object(obj)) => obj,
        Some(other) if !is_blank(other) => {
            return Err(NormalizeError::Container {
                key: QUOTE_CONTAINER,
                kind: json_kind(other),
            });
        }
        _ => &empty,
    };

    let open = safe_float(get_field(quote, OPEN));
    let high = safe_float(get_field(quote, HIGH));
    let low = safe_float(get_field(quote, LOW));
    let close = safe_float(get_field(quote, PRICE));
    let volume = safe_int(get_field(quote, VOLUME));
    let fetched_at = match get_field(quote, LATEST_TRADING_DAY) {
        Some(day) => parse_trading_day(day)?,
        None => now,
    };

    Ok(QuoteRecord::new(
        symbol.trim().to_uppercase(),
        fetched_at,
        open,
        high,
        low,
        close,
        volume,
        raw,
    ))
}

pub fn provider_message(raw: &Value) -> Option<&str> {
    PROVIDER_MESSAGE_KEYS
        .iter()
        .find_map(|key| raw.get(*key).and_then(Value::as_str))
}

// The offset of a full timestamp is dropped, not converted.
fn parse_trading_day(value: &Value) -> Result<DateTime<Utc>, NormalizeError> {
    let text = value
        .as_str()
        .ok_or_else(|| NormalizeError::TradingDay(value.to_string()))?
        .trim();

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Ok(datetime.naive_local().and_utc());
    }

    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|datetime| datetime.and_utc())
        .map_err(|_| NormalizeError::TradingDay(text.to_string()))
}
