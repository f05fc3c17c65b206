use anyhow::{Context, Result};
use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};

use crate::config::DatabaseConfig;

pub fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.name)
        .username(&config.user)
        .password(&config.password)
}

pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(config.connect_timeout)
}

/// Opens the run's single connection eagerly so an unreachable server fails here.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    pool_options(config)
        .connect_with(connect_options(config))
        .await
        .with_context(|| {
            format!(
                "Failed to connect to Postgres at {}:{}/{}",
                config.host, config.port, config.name
            )
        })
}

/// Identifiers are validated when the config is built; quoting keeps case intact.
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("\"{}\".\"{}\"", schema, table)
}
