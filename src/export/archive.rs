//! Packages an export root into a single `.ora` zip container.

use crate::error::ExportError;
use log::{debug, info};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const MIMETYPE_FILE: &str = "mimetype";
pub const MIMETYPE: &str = "image/openraster";
pub const ARCHIVE_EXTENSION: &str = "ora";

/// Zips every file under `root` into `archive_path`.
///
/// Entry names are relative to `root`, slash-separated, without a leading
/// `./`. The `mimetype` entry goes first and is stored uncompressed so
/// readers can sniff the container type; everything else is deflated in
/// sorted walk order. Returns the number of entries written.
pub fn write_archive(root: &Path, archive_path: &Path) -> Result<usize, ExportError> {
    let mut entries = collect_entries(root)?;
    // Stable: keeps the walk order for everything but the mimetype.
    entries.sort_by_key(|(name, _)| name != MIMETYPE_FILE);

    let file = File::create(archive_path).map_err(ExportError::fs(archive_path))?;
    let mut zip = ZipWriter::new(file);

    for (name, path) in &entries {
        let method = if name == MIMETYPE_FILE {
            CompressionMethod::Stored
        } else {
            CompressionMethod::Deflated
        };
        zip.start_file(
            name.as_str(),
            SimpleFileOptions::default().compression_method(method),
        )?;
        let mut source = File::open(path).map_err(ExportError::fs(path))?;
        io::copy(&mut source, &mut zip).map_err(ExportError::fs(path))?;
        debug!("Archived {}", name);
    }
    zip.finish()?;

    info!(
        "Wrote {} entries to {}",
        entries.len(),
        archive_path.display()
    );
    Ok(entries.len())
}

fn collect_entries(root: &Path) -> Result<Vec<(String, PathBuf)>, ExportError> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| ExportError::Archive(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| ExportError::Archive(e.to_string()))?;
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        entries.push((name, entry.into_path()));
    }
    Ok(entries)
}
