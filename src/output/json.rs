//! JSON results file
//!
//! The results file is a pretty-printed JSON array of [`UrlAudit`] records.
//! It is rewritten in full at every checkpoint.

use crate::crawler::UrlAudit;
use crate::output::traits::{OutputError, OutputResult, ResultSink};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes the results array, creating parent directories as needed
///
/// # Arguments
///
/// * `path` - Destination file (overwritten)
/// * `results` - Records to write
pub fn write_results(path: &Path, results: &[UrlAudit]) -> OutputResult<()> {
    let json = serde_json::to_string_pretty(results)?;

    let write_err = |source: std::io::Error| OutputError::Write {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, json).map_err(write_err)?;

    Ok(())
}

/// Reads a results file written by [`write_results`]
pub fn read_results(path: &Path) -> OutputResult<Vec<UrlAudit>> {
    let content = fs::read_to_string(path).map_err(|source| OutputError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Result sink that rewrites a JSON file at every checkpoint
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for JsonFileSink {
    fn checkpoint(&mut self, results: &[UrlAudit]) -> OutputResult<()> {
        write_results(&self.path, results)
    }

    fn finalize(&mut self, results: &[UrlAudit]) -> OutputResult<()> {
        write_results(&self.path, results)
    }
}
