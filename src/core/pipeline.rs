use crate::core::loader::load_records;
use crate::core::writer::RecordWriter;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{InputRecord, TransformResult, TransformSummary};
use crate::domain::services::{compute_category_counts, transform_record};
use crate::utils::error::{EtlError, Result};
use std::path::Path;

/// Restaurant cleanup: count categories over the full input, then flatten
/// and filter each record, then write the survivors in input order.
pub struct CleanupPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CleanupPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

// Bare stream errors get the file they happened on.
fn with_path(err: EtlError, path: &Path) -> EtlError {
    match err {
        EtlError::IoError(source) => EtlError::file(path, source),
        other => other,
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for CleanupPipeline<S, C> {
    fn extract(&self) -> Result<Vec<InputRecord>> {
        let path = self.config.input_path();
        tracing::debug!("Reading records from: {}", path.display());

        let reader = self.storage.open(path)?;
        load_records(reader).map_err(|e| with_path(e, path))
    }

    fn transform(&self, data: Vec<InputRecord>) -> Result<TransformResult> {
        let category_counts = compute_category_counts(&data);
        tracing::debug!("Counted {} distinct categories", category_counts.len());

        let mut summary = TransformSummary {
            records_read: data.len(),
            ..Default::default()
        };
        let mut records = Vec::with_capacity(data.len());

        for record in data {
            let price_present = record.fields.get("price").is_some_and(|v| !v.is_null());

            match transform_record(record, &category_counts)? {
                Some(out) => {
                    if out.category.is_none() {
                        summary.without_category += 1;
                    }
                    if out.price.is_some() {
                        summary.with_price += 1;
                    } else if price_present {
                        summary.invalid_price += 1;
                    }
                    records.push(out);
                }
                None => summary.dropped_missing_coordinates += 1,
            }
        }
        summary.records_kept = records.len();

        Ok(TransformResult {
            records,
            category_counts,
            summary,
        })
    }

    fn load(&self, result: &TransformResult) -> Result<String> {
        let path = self.config.output_path();
        tracing::debug!("Writing {} records to: {}", result.records.len(), path.display());

        let mut writer = RecordWriter::new(self.storage.create(path)?);
        writer
            .write_records(&result.records)
            .map_err(|e| with_path(e, path))?;
        let written = writer.finish().map_err(|e| with_path(e, path))?;

        tracing::debug!("Wrote {} records", written);
        Ok(path.display().to_string())
    }
}
