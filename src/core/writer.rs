use crate::utils::error::{EtlError, Result};
use serde::Serialize;
use serde_json::error::Category;
use std::io::{BufWriter, Write};

/// Writes records as newline-delimited compact JSON.
///
/// Buffered; call [`RecordWriter::finish`] to flush and see flush errors.
/// Dropping without `finish` still flushes on a best-effort basis.
pub struct RecordWriter<W: Write> {
    writer: BufWriter<W>,
    written: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            written: 0,
        }
    }

    pub fn write_record<T: Serialize>(&mut self, record: &T) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record).map_err(|e| match e.classify() {
            Category::Io => EtlError::IoError(e.into()),
            _ => EtlError::SerializationError(e),
        })?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn write_records<'a, T, I>(&mut self, records: I) -> Result<()>
    where
        T: Serialize + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush everything and return the number of records written.
    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush()?;
        Ok(self.written)
    }
}
