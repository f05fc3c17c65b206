use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request failed with status {0}")]
    Status(StatusCode),

    #[error("malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl FetchError {
    /// Transport failures and non-2xx responses; a bad body is not an HTTP error.
    pub fn is_http(&self) -> bool {
        matches!(self, FetchError::Transport(_) | FetchError::Status(_))
    }
}

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("expected a JSON object at the top level, got {0}")]
    Shape(&'static str),

    #[error("quote container '{key}' is a {kind}, not an object")]
    Container { key: &'static str, kind: &'static str },

    #[error("invalid latest trading day '{0}'")]
    TradingDay(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no symbols specified. Set STOCK_SYMBOLS or use --symbols")]
    MissingSymbols,

    #[error("unsupported provider '{0}'. Only ALPHAVANTAGE is implemented")]
    UnsupportedProvider(String),

    #[error("missing ALPHAVANTAGE_API_KEY")]
    MissingApiKey,

    #[error("invalid POSTGRES_PORT '{0}'")]
    InvalidPort(String),

    #[error("invalid SQL identifier '{0}'")]
    InvalidIdentifier(String),
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Why a single symbol was left out of the batch.
#[derive(Debug, Error)]
pub enum SymbolError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

impl SymbolError {
    pub fn is_http(&self) -> bool {
        matches!(self, SymbolError::Fetch(err) if err.is_http())
    }
}
