use reqwest::Client;
use serde_json::{Map, Value};

use crate::error::FetchError;

pub async fn make_request(
    client: &Client,
    base_url: &str,
    params: &[(&str, &str)],
) -> Result<Value, FetchError> {
    let res = client.get(base_url).query(params).send().await?;

    if !res.status().is_success() {
        return Err(FetchError::Status(res.status()));
    }

    let text = res.text().await?;
    let data = serde_json::from_str::<Value>(&text)?;

    Ok(data)
}

/// Mirrors the provider's loose notion of "no value": null, zero, and empty
/// strings or collections all count as missing.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(obj) => obj.is_empty(),
    }
}

/// First non-blank value among the candidate keys, in order.
pub fn first_present<'a>(obj: &'a Map<String, Value>, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| !is_blank(value))
}

/// Looks a field up under its documented key, then with the `.` separators removed.
pub fn get_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    let alias = key.replace('.', "");
    first_present(obj, &[key, alias.as_str()])
}

pub fn safe_float(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Integer coercion that truncates toward zero: `"12.9"` gives 12, `"-3.5"` gives -3.
pub fn safe_int(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    }
}

fn truncate(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Some(truncated as i64)
    } else {
        None
    }
}
