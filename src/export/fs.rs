//! Filesystem side of the export: directories, clean-slate removal and
//! buffered file creation. Every OS error carries the path it happened on.

use crate::error::ExportError;
use log::debug;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirStatus {
    Created,
    AlreadyExists,
}

/// Creates `path` and any missing parents.
///
/// An existing directory is not an error. Anything else the OS reports,
/// including a regular file in the way, is fatal.
pub fn make_dirs(path: &Path) -> Result<DirStatus, ExportError> {
    if path.is_dir() {
        return Ok(DirStatus::AlreadyExists);
    }
    match fs::create_dir_all(path) {
        Ok(()) => {
            debug!("Created directory {}", path.display());
            Ok(DirStatus::Created)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => {
            Ok(DirStatus::AlreadyExists)
        }
        Err(source) => Err(ExportError::Filesystem {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Removes a previous export at `path`, if any. Returns whether something
/// was removed.
pub fn remove_existing(path: &Path) -> Result<bool, ExportError> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => {
            fs::remove_dir_all(path).map_err(ExportError::fs(path))?;
            Ok(true)
        }
        Ok(_) => {
            fs::remove_file(path).map_err(ExportError::fs(path))?;
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(ExportError::Filesystem {
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub fn create_file(path: &Path) -> Result<BufWriter<File>, ExportError> {
    let file = File::create(path).map_err(ExportError::fs(path))?;
    Ok(BufWriter::new(file))
}

pub fn write_file(path: &Path, contents: &[u8]) -> Result<(), ExportError> {
    fs::write(path, contents).map_err(ExportError::fs(path))?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Maps a slash-separated export path onto the local filesystem under `root`.
pub fn resolve(root: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|part| !part.is_empty())
        .fold(root.to_path_buf(), |path, part| path.join(part))
}
