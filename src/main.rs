use std::process::ExitCode;

use clap::Parser;
use quote_ingest::{
    config::Config,
    services::{ExitStatus, run},
};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Fetch latest stock quotes and append them to Postgres")]
struct Args {
    /// Comma-separated symbols to fetch, e.g. MSFT,AAPL. Overrides STOCK_SYMBOLS.
    #[arg(long)]
    symbols: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "configuration error");
            return ExitStatus::Config.into();
        }
    };

    run(args.symbols.as_deref(), &config).await.into()
}
