use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::error::Result;
use crate::parser::VehicleRecord;

/// CSV report, truncated on creation and flushed after every row so an
/// aborted run keeps what it already wrote.
pub struct ReportWriter {
    writer: Writer<File>,
    rows: usize,
}

impl ReportWriter {
    pub fn create(path: &Path, header: &[String]) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = csv::WriterBuilder::new().from_path(path)?;
        writer.write_record(header)?;
        writer.flush()?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn append(&mut self, record: &VehicleRecord) -> Result<()> {
        self.writer.write_record(record.to_row())?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
}

// ── Tests ──
