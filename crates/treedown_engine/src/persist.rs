use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),
    #[error("cannot create directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("cannot write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Ensure output directory exists; create it and any missing parents if not.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PersistError::NotADirectory(dir.to_path_buf())),
        Err(_) => fs::create_dir_all(dir).map_err(|source| PersistError::CreateDir {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
///
/// Readers never observe a half-written Markdown file, and an existing file of
/// the same name is replaced.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let write_err = |source: io::Error| PersistError::Write {
            path: target.clone(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        tmp.write_all(content.as_bytes()).map_err(write_err)?;
        tmp.flush().map_err(write_err)?;
        tmp.as_file_mut().sync_all().map_err(write_err)?;

        tmp.persist(&target).map_err(|e| write_err(e.error))?;
        Ok(target)
    }
}
