pub mod pipeline;
pub mod quote_ingest_service;

pub use pipeline::{Batch, PACING_INTERVAL, Pacer, Pipeline, TokioPacer};
pub use quote_ingest_service::{ExitStatus, RunReport, ingest, preflight, run};
