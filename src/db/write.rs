use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, types::Json};

use super::utils::qualified_table;
use crate::models::QuoteRecord;

/// Destination for a run's batch.
#[async_trait]
pub trait QuoteSink: Send + Sync {
    async fn write(&self, records: &[QuoteRecord]) -> Result<u64>;
}

pub struct PgQuoteWriter {
    pool: PgPool,
    table: String,
}

impl PgQuoteWriter {
    pub fn new(pool: PgPool, schema: &str, table: &str) -> Self {
        Self {
            pool,
            table: qualified_table(schema, table),
        }
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl QuoteSink for PgQuoteWriter {
    async fn write(&self, records: &[QuoteRecord]) -> Result<u64> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to open transaction")?;

        let rows = insert_quotes(records, &self.table, &mut tx).await?;

        tx.commit()
            .await
            .with_context(|| format!("Failed to commit {} rows into {}", rows, self.table))?;

        Ok(rows)
    }
}

pub fn insert_statement<'a>(records: &'a [QuoteRecord], table: &str) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new(format!(
        "INSERT INTO {} (symbol, fetched_at, open, high, low, close, volume, raw) ",
        table
    ));

    builder.push_values(records, |mut row, record| {
        row.push_bind(record.symbol().as_str())
            .push_bind(*record.fetched_at())
            .push_bind(*record.open())
            .push_bind(*record.high())
            .push_bind(*record.low())
            .push_bind(*record.close())
            .push_bind(*record.volume())
            .push_bind(Json(record.raw()));
    });

    builder
}

pub async fn insert_quotes(
    records: &[QuoteRecord],
    table: &str,
    tx: &mut sqlx::Transaction<'_, Postgres>,
) -> Result<u64> {
    let mut builder = insert_statement(records, table);
    let result = builder
        .build()
        .execute(&mut **tx)
        .await
        .with_context(|| format!("Failed to insert {} quotes into {}", records.len(), table))?;

    Ok(result.rows_affected())
}
