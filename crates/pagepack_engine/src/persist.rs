use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use engine_logging::engine_info;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::filename::archive_filename;

pub const DEFAULT_OUTPUT_DIR: &str = "downloads";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Writes page archives to `{root}/{title}.zip` by writing a temp file then
/// renaming, so a failed write never leaves a partial archive and
/// re-persisting a title simply replaces the previous file.
#[derive(Debug, Clone)]
pub struct ArchiveStore {
    root: PathBuf,
}

impl Default for ArchiveStore {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

impl ArchiveStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Target path for a (sanitized) title, whether or not it exists yet.
    pub fn archive_path(&self, title: &str) -> PathBuf {
        self.root.join(archive_filename(title))
    }

    /// Persists one archive and returns the number of bytes written.
    pub fn persist(&self, title: &str, archive: &[u8]) -> Result<u64, PersistError> {
        ensure_output_dir(&self.root)?;

        let target = self.archive_path(title);
        let mut tmp = NamedTempFile::new_in(&self.root)?;
        tmp.write_all(archive)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        engine_info!("saved {}", target.display());
        Ok(archive.len() as u64)
    }
}
