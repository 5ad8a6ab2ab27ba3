//! Directory-backed store for caller-supplied image bytes.
//!
//! The store is configured explicitly through [`StoreConfig`]; nothing here
//! is process-global. The matching core never touches the store, it only
//! backs the raw-bytes entry points.

mod filename;

pub use filename::{FilenameGenerator, SEQUENCE_WRAP};

use crate::util::{CorrLocateError, CorrLocateResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for a [`TempStore`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreConfig {
    /// Writable directory that receives stored files.
    pub directory: Option<PathBuf>,
}

impl StoreConfig {
    /// Creates a config pointing at `directory`.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: Some(directory.into()),
        }
    }

    /// Checks that a directory is set and is an existing directory.
    pub fn validate(&self) -> CorrLocateResult<&Path> {
        let dir = self
            .directory
            .as_deref()
            .ok_or(CorrLocateError::StoreNotConfigured)?;
        check_directory(dir)?;
        Ok(dir)
    }
}

fn check_directory(dir: &Path) -> CorrLocateResult<()> {
    let meta = fs::metadata(dir).map_err(|source| CorrLocateError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(CorrLocateError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    Ok(())
}

/// Persists byte buffers under unique filenames.
#[derive(Debug, Default)]
pub struct TempStore {
    cfg: StoreConfig,
    names: FilenameGenerator,
}

impl TempStore {
    /// Creates a store; the directory is checked on every [`TempStore::put`].
    pub fn new(cfg: StoreConfig) -> Self {
        Self {
            cfg,
            names: FilenameGenerator::new(),
        }
    }

    /// Creates a store for `directory`, failing early if it is unusable.
    pub fn configure(directory: impl Into<PathBuf>) -> CorrLocateResult<Self> {
        let cfg = StoreConfig::new(directory);
        cfg.validate()?;
        Ok(Self::new(cfg))
    }

    /// Returns the configured directory, if any.
    pub fn directory(&self) -> Option<&Path> {
        self.cfg.directory.as_deref()
    }

    /// Returns the filename generator.
    pub fn names(&self) -> &FilenameGenerator {
        &self.names
    }

    /// Writes `bytes` to a freshly named file and returns its path.
    pub fn put(&self, bytes: &[u8]) -> CorrLocateResult<PathBuf> {
        let dir = self.cfg.validate()?;
        let path = dir.join(self.names.next_name());
        fs::write(&path, bytes).map_err(|source| CorrLocateError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
