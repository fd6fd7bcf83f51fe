use super::{SinkError, SummarySink};
use crate::types::{BatchSummary, SUMMARY_COLUMNS};
use std::fs::File;
use std::path::Path;

use async_trait::async_trait;
use csv::{Writer, WriterBuilder};

/// Appends one line per summary to a comma separated file.
///
/// The file is recreated on open and the header is written immediately, so a run that emits
/// nothing still leaves a valid file behind.
pub struct CsvSink {
    writer: Writer<File>,
}

impl CsvSink {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.write_record(SUMMARY_COLUMNS)?;
        writer.flush()?;

        log::info!("Writing batch summaries to: {}", path.display());
        Ok(CsvSink { writer })
    }
}

#[async_trait]
impl SummarySink for CsvSink {
    async fn append(&mut self, summary: &BatchSummary) -> Result<(), SinkError> {
        self.writer.serialize(summary)?;
        self.writer.flush()?;
        Ok(())
    }

    fn backend_type(&self) -> &'static str {
        "CSV"
    }
}
