use super::{SinkError, SummarySink};
use crate::types::BatchSummary;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rusqlite::{params, Connection};

pub const SUMMARY_TABLE: &str = "batch_summaries";

/// Appends one row per summary to a SQLite table.
///
/// The connection is opened per write; only the table is created up front.
pub struct SqliteSink {
    db_path: PathBuf,
}

impl SqliteSink {
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&db_path)?;
        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {SUMMARY_TABLE} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    start_slot INTEGER NOT NULL,
                    end_slot INTEGER NOT NULL,
                    total_transactions INTEGER NOT NULL,
                    average_tps REAL NOT NULL,
                    max_fee_native REAL NOT NULL,
                    average_fee_native REAL NOT NULL,
                    median_fee_native REAL NOT NULL,
                    percentile95_fee_native REAL NOT NULL,
                    max_compute_units INTEGER NOT NULL,
                    average_compute_units REAL NOT NULL,
                    median_compute_units REAL NOT NULL,
                    fiat_price REAL NOT NULL
                )"
            ),
            [],
        )?;

        log::info!("SQLite table {} ready in {}", SUMMARY_TABLE, db_path.display());
        Ok(SqliteSink { db_path })
    }

    fn insert(&self, summary: &BatchSummary) -> Result<(), SinkError> {
        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            &format!(
                "INSERT INTO {SUMMARY_TABLE} (
                    start_slot, end_slot, total_transactions, average_tps,
                    max_fee_native, average_fee_native, median_fee_native, percentile95_fee_native,
                    max_compute_units, average_compute_units, median_compute_units, fiat_price
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
            ),
            params![
                summary.start_slot as i64,
                summary.end_slot as i64,
                summary.total_transactions as i64,
                summary.average_tps,
                summary.max_fee_native,
                summary.average_fee_native,
                summary.median_fee_native,
                summary.percentile95_fee_native,
                summary.max_compute_units as i64,
                summary.average_compute_units,
                summary.median_compute_units,
                summary.fiat_price,
            ],
        )?;
        Ok(())
    }
}

#[async_trait]
impl SummarySink for SqliteSink {
    async fn append(&mut self, summary: &BatchSummary) -> Result<(), SinkError> {
        self.insert(summary)?;
        log::debug!(
            "Summary for slots {}..{} inserted",
            summary.start_slot,
            summary.end_slot
        );
        Ok(())
    }

    fn backend_type(&self) -> &'static str {
        "SQLite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::tests::sample_summary;
    use crate::types::SUMMARY_COLUMNS;
    use tempfile::tempdir;

    #[tokio::test]
    async fn appends_one_row_per_summary() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("fees.db");
        let mut sink = SqliteSink::new(&db_path).unwrap();

        sink.append(&sample_summary(1000)).await.unwrap();
        sink.append(&sample_summary(990)).await.unwrap();

        let conn = Connection::open(&db_path).unwrap();
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {SUMMARY_TABLE}"), [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 2);

        let (start, end, cu_median, price): (i64, i64, f64, f64) = conn
            .query_row(
                &format!(
                    "SELECT start_slot, end_slot, median_compute_units, fiat_price
                     FROM {SUMMARY_TABLE} ORDER BY id DESC LIMIT 1"
                ),
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .unwrap();
        assert_eq!((start, end), (990, 981));
        assert_eq!(cu_median, 1_500.5);
        assert_eq!(price, 142.37);
    }

    #[tokio::test]
    async fn reopening_keeps_existing_rows() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("fees.db");

        let mut sink = SqliteSink::new(&db_path).unwrap();
        sink.append(&sample_summary(1000)).await.unwrap();

        let mut sink = SqliteSink::new(&db_path).unwrap();
        sink.append(&sample_summary(500)).await.unwrap();

        let conn = Connection::open(&db_path).unwrap();
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {SUMMARY_TABLE}"), [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn table_columns_match_summary_schema() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("fees.db");
        SqliteSink::new(&db_path).unwrap();

        let conn = Connection::open(&db_path).unwrap();
        let mut stmt = conn
            .prepare(&format!("PRAGMA table_info({SUMMARY_TABLE})"))
            .unwrap();
        let columns = stmt
            .query_map([], |row| row.get::<_, String>(1))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(columns[0], "id");
        assert_eq!(&columns[1..], &SUMMARY_COLUMNS[..]);
    }
}
