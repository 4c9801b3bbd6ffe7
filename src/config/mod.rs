#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_distinct_paths, validate_non_empty_string, validate_path, Validate,
};
use std::path::{Path, PathBuf};

pub const DEFAULT_PIPELINE_NAME: &str = "restaurant-cleanup";
pub const DEFAULT_INPUT_PATH: &str = "restaurants.ndjson";
pub const DEFAULT_OUTPUT_PATH: &str = "restaurants_cleaned.ndjson";

/// Fully resolved run settings (CLI flags over TOML file over defaults).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    pub name: String,
    pub description: Option<String>,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub monitor: bool,
    pub dry_run: bool,
    /// How many of the most frequent categories to log; 0 disables.
    pub top_categories: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_PIPELINE_NAME.to_string(),
            description: None,
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            monitor: false,
            dry_run: false,
            top_categories: 0,
        }
    }
}

impl PipelineSettings {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            ..Default::default()
        }
    }
}

impl ConfigProvider for PipelineSettings {
    fn input_path(&self) -> &Path {
        &self.input_path
    }

    fn output_path(&self) -> &Path {
        &self.output_path
    }
}

impl Validate for PipelineSettings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("pipeline.name", &self.name)?;
        validate_path("input_path", &self.input_path)?;
        validate_path("output_path", &self.output_path)?;
        validate_distinct_paths(&self.input_path, &self.output_path)?;
        Ok(())
    }
}
