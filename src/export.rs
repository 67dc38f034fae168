use crate::error::ExportError;
use crate::scraper::ProductRecord;
pub use crate::{log_error, log_info};
use std::path::{Path, PathBuf};

const HEADERS: [&str; 4] = ["Name", "Price", "Description", "Image_URL"];

// Tabular sink for scraped records. Zero records still produce a header-only
// file; failures are reported as false, never raised, so the run can still
// account for what it scraped.
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, records: &[ProductRecord]) -> bool {
        match self.try_write(records) {
            Ok(()) => {
                log_info!(
                    "[export] Saved {} records to {}",
                    records.len(),
                    self.path.display()
                );
                true
            }
            Err(e) => {
                log_error!(
                    "[export] Cannot write to {}: {}",
                    self.path.display(),
                    e
                );
                false
            }
        }
    }

    fn try_write(&self, records: &[ProductRecord]) -> Result<(), ExportError> {
        let mut writer = csv::Writer::from_path(&self.path)?;

        if records.is_empty() {
            writer.write_record(HEADERS)?;
        } else {
            for record in records {
                writer.serialize(record)?;
            }
        }

        writer.flush()?;
        Ok(())
    }
}
