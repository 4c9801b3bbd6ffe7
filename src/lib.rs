//! Restaurant dataset cleanup.
//!
//! Reads newline-delimited JSON restaurant records, picks one representative
//! category per restaurant by global popularity, drops records without usable
//! coordinates and writes a flattened newline-delimited JSON dataset.
//!
//! ```no_run
//! use restaurant_cleanup::{CleanupPipeline, EtlEngine, LocalStorage, PipelineSettings};
//!
//! # fn main() -> restaurant_cleanup::Result<()> {
//! let settings = PipelineSettings::new("restaurants.ndjson", "restaurants_cleaned.ndjson");
//! let engine = EtlEngine::new(CleanupPipeline::new(LocalStorage::new(), settings));
//! let report = engine.run()?;
//! println!("kept {} records", report.summary.records_kept);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::{toml_config::TomlConfig, PipelineSettings};

pub use adapters::LocalStorage;
pub use core::{
    etl::{EtlEngine, RunReport},
    pipeline::CleanupPipeline,
};
pub use domain::model::{Category, CategoryCounts, OutputRecord, PriceTier, TransformSummary};
pub use utils::error::{EtlError, Result};
