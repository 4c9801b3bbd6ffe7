use crate::domain::model::{InputRecord, TransformResult};
use crate::utils::error::Result;
use std::io::{BufRead, Write};
use std::path::Path;

pub trait Storage {
    type Reader: BufRead;
    type Writer: Write;

    /// Open an existing source for reading.
    fn open(&self, path: &Path) -> Result<Self::Reader>;

    /// Create (or truncate) a destination for writing.
    fn create(&self, path: &Path) -> Result<Self::Writer>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &Path;
    fn output_path(&self) -> &Path;
}

/// Two-phase batch: `transform` only runs once `extract` has materialized
/// every record, and `load` only once every record has been transformed.
pub trait Pipeline {
    fn extract(&self) -> Result<Vec<InputRecord>>;
    fn transform(&self, data: Vec<InputRecord>) -> Result<TransformResult>;
    fn load(&self, result: &TransformResult) -> Result<String>;
}
