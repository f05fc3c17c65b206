use std::{env, time::Duration};

use crate::error::ConfigError;

pub const SUPPORTED_PROVIDER: &str = "ALPHAVANTAGE";
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub schema: String,
    pub table: String,
    pub connect_timeout: Duration,
}

/// Process configuration, read once at startup and passed down by reference.
#[derive(Clone, Debug)]
pub struct Config {
    pub provider: String,
    pub api_key: Option<String>,
    pub symbols: Option<String>,
    pub base_url: String,
    pub request_timeout: Duration,
    pub database: DatabaseConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let or = |name: &str, default: &str| get(name).unwrap_or_else(|| default.to_string());

        let port = match get("POSTGRES_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => 5432,
        };

        let connect_timeout = get("POSTGRES_CONNECT_TIMEOUT_SECS")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));

        let database = DatabaseConfig {
            host: or("POSTGRES_HOST", "postgres"),
            port,
            name: or("POSTGRES_DB", "airflow"),
            user: or("POSTGRES_USER", "airflow"),
            password: or("POSTGRES_PASSWORD", "airflow"),
            schema: validate_identifier(or("STOCK_DB_SCHEMA", "public"))?,
            table: validate_identifier(or("STOCK_DB_TABLE", "stocks"))?,
            connect_timeout,
        };

        Ok(Self {
            provider: or("STOCK_API_PROVIDER", SUPPORTED_PROVIDER),
            api_key: get("ALPHAVANTAGE_API_KEY"),
            symbols: get("STOCK_SYMBOLS"),
            base_url: or("ALPHAVANTAGE_BASE_URL", DEFAULT_BASE_URL),
            request_timeout: Duration::from_secs(30),
            database,
        })
    }

    pub fn provider_supported(&self) -> bool {
        self.provider.trim().eq_ignore_ascii_case(SUPPORTED_PROVIDER)
    }

    /// Symbols from the explicit argument if given, otherwise from `STOCK_SYMBOLS`.
    pub fn resolve_symbols(&self, arg: Option<&str>) -> Vec<String> {
        let raw = arg
            .filter(|s| !s.trim().is_empty())
            .or(self.symbols.as_deref())
            .unwrap_or_default();

        parse_symbols(raw)
    }
}

pub fn parse_symbols(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_uppercase)
        .collect()
}

fn validate_identifier(name: String) -> Result<String, ConfigError> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(name)
    } else {
        Err(ConfigError::InvalidIdentifier(name))
    }
}
