#[cfg(test)]
mod tests {
    use std::{collections::HashMap, time::Duration};

    use crate::{
        config::{Config, DEFAULT_BASE_URL, parse_symbols},
        error::ConfigError,
    };

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.provider, "ALPHAVANTAGE");
        assert_eq!(config.api_key, None);
        assert_eq!(config.symbols, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.database.host, "postgres");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.name, "airflow");
        assert_eq!(config.database.user, "airflow");
        assert_eq!(config.database.schema, "public");
        assert_eq!(config.database.table, "stocks");
        assert_eq!(config.database.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = config_from(&[
            ("ALPHAVANTAGE_API_KEY", "demo"),
            ("STOCK_SYMBOLS", "MSFT,AAPL"),
            ("POSTGRES_HOST", "db.internal"),
            ("POSTGRES_PORT", "6543"),
            ("STOCK_DB_SCHEMA", "market"),
            ("STOCK_DB_TABLE", "quotes_raw"),
            ("POSTGRES_CONNECT_TIMEOUT_SECS", "3"),
        ])
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("demo"));
        assert_eq!(config.symbols.as_deref(), Some("MSFT,AAPL"));
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 6543);
        assert_eq!(config.database.schema, "market");
        assert_eq!(config.database.table, "quotes_raw");
        assert_eq!(config.database.connect_timeout, Duration::from_secs(3));
    }

    #[test]
    fn empty_values_count_as_missing() {
        let config = config_from(&[("ALPHAVANTAGE_API_KEY", ""), ("STOCK_API_PROVIDER", "  ")]).unwrap();

        assert_eq!(config.api_key, None);
        assert_eq!(config.provider, "ALPHAVANTAGE");
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = config_from(&[("POSTGRES_PORT", "five")]).unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort("five".to_string()));
    }

    #[test]
    fn table_names_must_be_plain_identifiers() {
        let err = config_from(&[("STOCK_DB_TABLE", "stocks; DROP TABLE x")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidIdentifier(_)));

        let err = config_from(&[("STOCK_DB_SCHEMA", "1public")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidIdentifier(_)));

        assert!(config_from(&[("STOCK_DB_TABLE", "_stocks_2024")]).is_ok());
    }

    #[test]
    fn provider_check_ignores_case() {
        assert!(config_from(&[("STOCK_API_PROVIDER", "alphavantage")]).unwrap().provider_supported());
        assert!(!config_from(&[("STOCK_API_PROVIDER", "YAHOO")]).unwrap().provider_supported());
    }

    #[test]
    fn symbols_are_trimmed_and_uppercased() {
        assert_eq!(parse_symbols(" msft, ,aapl ,"), vec!["MSFT", "AAPL"]);
        assert_eq!(parse_symbols("MSFT,msft"), vec!["MSFT", "MSFT"]);
        assert!(parse_symbols(" , ").is_empty());
    }

    #[test]
    fn argument_takes_precedence_over_environment() {
        let config = config_from(&[("STOCK_SYMBOLS", "IBM")]).unwrap();

        assert_eq!(config.resolve_symbols(Some("msft,aapl")), vec!["MSFT", "AAPL"]);
        assert_eq!(config.resolve_symbols(None), vec!["IBM"]);
        assert_eq!(config.resolve_symbols(Some("")), vec!["IBM"]);
    }
}
