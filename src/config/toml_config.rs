use crate::config::PipelineSettings;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optional TOML configuration file.
///
/// ```toml
/// [pipeline]
/// name = "nyc-restaurants"
///
/// [source]
/// input_path = "data/restaurants.ndjson"
///
/// [load]
/// output_path = "data/restaurants_cleaned.ndjson"
///
/// [monitoring]
/// enabled = true
/// top_categories = 10
/// ```
///
/// Relative paths are taken relative to the working directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: Option<PipelineConfig>,
    pub source: Option<SourceConfig>,
    pub load: Option<LoadConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub input_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    #[serde(default)]
    pub enabled: bool,
    pub top_categories: Option<usize>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|e| EtlError::file(path.as_ref(), e))?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Overlay the values this file sets onto `settings`.
    pub fn apply_to(&self, settings: &mut PipelineSettings) {
        if let Some(pipeline) = &self.pipeline {
            settings.name = pipeline.name.clone();
            if pipeline.description.is_some() {
                settings.description = pipeline.description.clone();
            }
        }
        if let Some(source) = &self.source {
            settings.input_path = source.input_path.clone();
        }
        if let Some(load) = &self.load {
            settings.output_path = load.output_path.clone();
        }
        if let Some(monitoring) = &self.monitoring {
            settings.monitor = monitoring.enabled;
            if let Some(top) = monitoring.top_categories {
                settings.top_categories = top;
            }
        }
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().is_some_and(|m| m.enabled)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(pipeline) = &self.pipeline {
            validate_non_empty_string("pipeline.name", &pipeline.name)?;
        }
        if let Some(source) = &self.source {
            validate_path("source.input_path", &source.input_path)?;
        }
        if let Some(load) = &self.load {
            validate_path("load.output_path", &load.output_path)?;
        }
        Ok(())
    }
}
