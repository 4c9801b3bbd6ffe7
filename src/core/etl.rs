use crate::core::Pipeline;
use crate::domain::model::{CategoryCounts, TransformSummary};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Outcome of one run. `output_path` is `None` for a dry run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_path: Option<String>,
    pub summary: TransformSummary,
    pub category_counts: CategoryCounts,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn run(&self) -> Result<RunReport> {
        self.execute(true)
    }

    /// Extract and transform only; nothing is written.
    pub fn dry_run(&self) -> Result<RunReport> {
        self.execute(false)
    }

    fn execute(&self, write_output: bool) -> Result<RunReport> {
        tracing::info!("Starting cleanup run");
        self.monitor.log_stats("Start");

        // Extract
        tracing::info!("Extracting records...");
        let records = self.pipeline.extract()?;
        tracing::info!("Extracted {} records", records.len());
        self.monitor.log_stats("Extract");

        // Transform
        tracing::info!("Transforming records...");
        let result = self.pipeline.transform(records)?;
        let summary = result.summary;
        tracing::info!(
            "Transformed {} records: kept {}, dropped {} without coordinates",
            summary.records_read,
            summary.records_kept,
            summary.dropped_missing_coordinates
        );
        tracing::debug!(
            "{} kept without a category, {} with a price, {} with an unrecognized price",
            summary.without_category,
            summary.with_price,
            summary.invalid_price
        );
        self.monitor.log_stats("Transform");

        // Load
        let output_path = if write_output {
            tracing::info!("Loading records...");
            let path = self.pipeline.load(&result)?;
            tracing::info!("Output saved to: {}", path);
            self.monitor.log_stats("Load");
            Some(path)
        } else {
            tracing::info!("Dry run: skipping output");
            None
        };

        self.monitor.log_final_stats();

        Ok(RunReport {
            output_path,
            summary,
            category_counts: result.category_counts,
        })
    }
}
