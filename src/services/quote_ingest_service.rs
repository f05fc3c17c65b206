use std::process::ExitCode;

use tracing::{error, info};

use super::pipeline::{Pacer, Pipeline, SymbolFailure, TokioPacer};
use crate::{
    api::{AlphaVantageClient, QuoteSource},
    config::Config,
    db::{self, PgQuoteWriter, QuoteSink},
    error::ConfigError,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Config,
    DatabaseConnect,
    Write,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Config => 1,
            ExitStatus::DatabaseConnect => 2,
            ExitStatus::Write => 3,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub requested: usize,
    pub attempted: usize,
    pub written: u64,
    pub failures: Vec<SymbolFailure>,
    pub write_error: Option<String>,
}

impl RunReport {
    pub fn status(&self) -> ExitStatus {
        match self.write_error {
            Some(_) => ExitStatus::Write,
            None => ExitStatus::Success,
        }
    }
}

/// Checks, in order, that there are symbols, that the provider is supported,
/// and that a credential is present. Returns the symbols and the key.
pub fn preflight<'a>(
    symbols_arg: Option<&str>,
    config: &'a Config,
) -> Result<(Vec<String>, &'a str), ConfigError> {
    let symbols = config.resolve_symbols(symbols_arg);
    if symbols.is_empty() {
        return Err(ConfigError::MissingSymbols);
    }

    if !config.provider_supported() {
        return Err(ConfigError::UnsupportedProvider(config.provider.clone()));
    }

    let api_key = config
        .api_key
        .as_deref()
        .ok_or(ConfigError::MissingApiKey)?;

    Ok((symbols, api_key))
}

pub async fn run(symbols_arg: Option<&str>, config: &Config) -> ExitStatus {
    let (symbols, api_key) = match preflight(symbols_arg, config) {
        Ok(resolved) => resolved,
        Err(err) => {
            error!(error = %err, "configuration error");
            return ExitStatus::Config;
        }
    };

    let source = match AlphaVantageClient::new(&config.base_url, api_key, config.request_timeout) {
        Ok(client) => client,
        Err(err) => {
            error!(error = %err, "failed to build HTTP client");
            return ExitStatus::Config;
        }
    };

    let pool = match db::connect(&config.database).await {
        Ok(pool) => pool,
        Err(err) => {
            error!(error = %format!("{:#}", err), "database connection failed");
            return ExitStatus::DatabaseConnect;
        }
    };

    let writer = PgQuoteWriter::new(pool, &config.database.schema, &config.database.table);
    let pipeline = Pipeline::new(source, TokioPacer);

    let report = ingest(&pipeline, &writer, &symbols).await;
    writer.close().await;

    report.status()
}

/// Runs the symbol loop, then hands the whole batch to the sink in one call.
pub async fn ingest<S, P, W>(pipeline: &Pipeline<S, P>, sink: &W, symbols: &[String]) -> RunReport
where
    S: QuoteSource,
    P: Pacer,
    W: QuoteSink,
{
    info!(count = symbols.len(), symbols = %symbols.join(","), "fetching quotes");

    let batch = pipeline.collect(symbols).await;
    let attempted = batch.records.len();

    let (written, write_error) = match sink.write(&batch.records).await {
        Ok(rows) => {
            info!(
                requested = symbols.len(),
                failed = batch.failures.len(),
                "Inserted {} rows",
                rows
            );
            (rows, None)
        }
        Err(err) => {
            let message = format!("{:#}", err);
            error!(attempted, error = %message, "DB write error");
            (0, Some(message))
        }
    };

    RunReport {
        requested: symbols.len(),
        attempted,
        written,
        failures: batch.failures,
        write_error,
    }
}
