use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Local filesystem storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    type Reader = BufReader<File>;
    type Writer = File;

    fn open(&self, path: &Path) -> Result<Self::Reader> {
        let file = File::open(path).map_err(|e| EtlError::file(path, e))?;
        Ok(BufReader::new(file))
    }

    fn create(&self, path: &Path) -> Result<Self::Writer> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| EtlError::file(parent, e))?;
        }

        File::create(path).map_err(|e| EtlError::file(path, e))
    }
}
