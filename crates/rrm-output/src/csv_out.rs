use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::debug;

use rrm_model::Result;

/// Buffered CSV writer that streams combined rows as they are produced.
///
/// The combined table is never held whole in memory; rows go to the writer
/// one at a time. [`CsvSink::finish`] must run before the output is
/// considered complete, any earlier write error aborts the run with whatever
/// was already flushed left on disk.
pub struct CsvSink {
    writer: csv::Writer<BufWriter<File>>,
    path: PathBuf,
    records: usize,
}

impl CsvSink {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: csv::Writer::from_writer(BufWriter::new(file)),
            path: path.to_path_buf(),
            records: 0,
        })
    }

    pub fn write_row(&mut self, row: &[String]) -> Result<()> {
        self.writer.write_record(row)?;
        self.records += 1;
        Ok(())
    }

    /// Flush everything to disk and return the record count (header
    /// included).
    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush()?;
        debug!(
            path = %self.path.display(),
            records = self.records,
            "combined csv flushed"
        );
        Ok(self.records)
    }
}
