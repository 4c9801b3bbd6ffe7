use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("IO error on '{path}': {source}")]
    FileError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid JSON on line {line}: {source}")]
    ParseError {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed record {}: {message}", record_location(.line, .alias))]
    SchemaError {
        line: usize,
        alias: Option<String>,
        message: String,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

fn record_location(line: &usize, alias: &Option<String>) -> String {
    match alias {
        Some(alias) => format!("on line {} (alias '{}')", line, alias),
        None => format!("on line {}", line),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Parse,
    Schema,
    Serialization,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Bad invocation or configuration; nothing was read.
    Medium,
    /// The input data is unusable.
    High,
    /// The filesystem refused an operation.
    Critical,
}

impl EtlError {
    pub fn file(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        EtlError::FileError {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::FileError { .. } | EtlError::IoError(_) => ErrorCategory::Io,
            EtlError::ParseError { .. } => ErrorCategory::Parse,
            EtlError::SchemaError { .. } => ErrorCategory::Schema,
            EtlError::SerializationError(_) => ErrorCategory::Serialization,
            EtlError::ConfigValidationError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Config => ErrorSeverity::Medium,
            ErrorCategory::Parse | ErrorCategory::Schema | ErrorCategory::Serialization => {
                ErrorSeverity::High
            }
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::FileError { path, source } => {
                format!("Could not access file '{}': {}", path, source)
            }
            EtlError::IoError(e) => format!("Read/write failure: {}", e),
            EtlError::ParseError { line, source } => {
                format!("Line {} of the input is not valid JSON ({})", line, source)
            }
            EtlError::SchemaError { .. } => self.to_string(),
            EtlError::SerializationError(e) => format!("Could not encode an output record: {}", e),
            EtlError::ConfigValidationError { .. } | EtlError::InvalidConfigValueError { .. } => {
                self.to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "Check that the input file exists and the output location is writable",
            ErrorCategory::Parse => "Fix or remove the offending line; each line must hold one JSON object",
            ErrorCategory::Schema => {
                "Make sure every record carries the restaurant fields (name, alias, categories, coordinates, location, ...)"
            }
            ErrorCategory::Serialization => "Inspect the record for values JSON cannot represent",
            ErrorCategory::Config => "Run with --help and review the --input/--output/--config values",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
