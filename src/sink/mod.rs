//! Durable destinations for batch summaries.
//!
//! Exactly one sink is active per run. Every summary is written on its own; a failed write is
//! reported to the caller and never retried.

mod csv;
mod sqlite;

pub use self::csv::CsvSink;
pub use self::sqlite::{SqliteSink, SUMMARY_TABLE};

use crate::config::StorageBackend;
use crate::types::BatchSummary;
use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

#[async_trait]
pub trait SummarySink: Send {
    /// Durably record a single summary.
    async fn append(&mut self, summary: &BatchSummary) -> Result<(), SinkError>;

    /// Backend name for logging
    fn backend_type(&self) -> &'static str;
}

impl StorageBackend {
    /// Opens the selected sink. The CSV file is truncated and gets a fresh header.
    pub fn open(
        self,
        db_path: &Path,
        csv_path: &Path,
    ) -> Result<Box<dyn SummarySink>, SinkError> {
        let sink: Box<dyn SummarySink> = match self {
            StorageBackend::Db => Box::new(SqliteSink::new(db_path)?),
            StorageBackend::Csv => Box::new(CsvSink::create(csv_path)?),
        };
        log::info!("Writing batch summaries to {} storage", sink.backend_type());
        Ok(sink)
    }
}
