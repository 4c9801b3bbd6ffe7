use crate::config::toml_config::TomlConfig;
use crate::config::PipelineSettings;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "restaurant-cleanup")]
#[command(about = "Clean and flatten a line-delimited JSON dataset of restaurant records")]
pub struct CliConfig {
    /// Input file, one JSON restaurant per line [default: restaurants.ndjson]
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output file, truncated if it exists [default: restaurants_cleaned.ndjson]
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// TOML configuration file; explicit flags take precedence over it
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log the N most frequent categories after the run
    #[arg(long, value_name = "N")]
    pub top_categories: Option<usize>,

    /// Log process CPU and memory at each phase
    #[arg(long)]
    pub monitor: bool,

    /// Read and transform but do not write the output file
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Merge defaults, the optional TOML file and the flags, then validate.
    pub fn resolve(&self) -> Result<PipelineSettings> {
        let mut settings = PipelineSettings::default();

        if let Some(config_path) = &self.config {
            tracing::info!("📁 Loading configuration from: {}", config_path.display());
            let file = TomlConfig::from_file(config_path)?;
            file.validate()?;
            file.apply_to(&mut settings);
        }

        // 命令列參數覆蓋設定檔
        if let Some(input) = &self.input {
            settings.input_path = input.clone();
        }
        if let Some(output) = &self.output {
            settings.output_path = output.clone();
        }
        if let Some(top) = self.top_categories {
            settings.top_categories = top;
        }
        settings.monitor |= self.monitor;
        settings.dry_run = self.dry_run;

        settings.validate()?;
        Ok(settings)
    }
}
