//! The export driver.
//!
//! Layout of one export root:
//!
//! ```text
//! <output_dir>/<name>/
//!     mimetype                 "image/openraster"
//!     stack.xml
//!     data/**.png              one image per flattened layer
//!     Thumbnails/thumbnail.png
//!     paths/*.csv              only when the document has paths
//! <output_dir>/<name>.ora      only when zipping
//! ```

pub mod archive;
pub mod fs;
pub mod thumbnail;

use crate::config::ExportConfig;
use crate::error::ExportError;
use archive::{ARCHIVE_EXTENSION, MIMETYPE, MIMETYPE_FILE};
use log::{debug, info, warn};
use ora_core::{
    EncodedPath, Flattened, LAYER_DATA_DIR, PATHS_DIR, STACK_XML, build, encode_all, flatten_all,
    write_geometry_table, write_stack_xml,
};
use ora_traits::{LayerRenderer, PngOptions};
use ora_types::{Document, ExportManifest};
use std::io::Write;
use std::path::{Path, PathBuf};
use thumbnail::{THUMBNAIL_DIR, THUMBNAIL_FILE, thumbnail_size};

/// What an export produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    /// The `<output_dir>/<name>` directory.
    pub root: PathBuf,
    pub archive: Option<PathBuf>,
    pub manifest: ExportManifest,
    /// Layer images written, the thumbnail not included.
    pub layer_images: usize,
    pub geometry_tables: usize,
}

/// Exports host documents with a fixed renderer and configuration.
#[derive(Debug)]
pub struct OraExporter<'r, R: LayerRenderer + ?Sized> {
    renderer: &'r R,
    config: ExportConfig,
}

impl<'r, R: LayerRenderer + ?Sized> OraExporter<'r, R> {
    pub fn new(renderer: &'r R, config: ExportConfig) -> Self {
        Self { renderer, config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Runs one complete export of `document`.
    ///
    /// The layer tree and paths are flattened and encoded before anything on
    /// disk is touched, so invalid input leaves a previous export intact.
    /// After that, the previous export root is removed and files are written
    /// in order; the first failure aborts and leaves a partial tree.
    pub fn export(&self, document: &Document) -> Result<ExportReport, ExportError> {
        self.config.validate()?;

        let name = document.name();
        info!(
            "Exporting '{}' ({}x{}, {} top-level layers, {} paths) with {}",
            name,
            document.width,
            document.height,
            document.layers.len(),
            document.paths.len(),
            self.renderer.name()
        );
        if document.layers.is_empty() {
            warn!("Document '{}' has no layers; exporting an empty stack.", name);
        }

        let flattened = flatten_all(&document.layers, LAYER_DATA_DIR, self.config.merge_groups)?;
        let encoded_paths = encode_all(&document.paths, PATHS_DIR)?;

        let root = self.config.output_dir.join(&name);
        if fs::remove_existing(&root)? {
            info!("Removed previous export at {}", root.display());
        }

        let layer_images = self.write_layers(&root, &flattened)?;
        self.write_thumbnail(&root, document)?;
        let geometry_tables = write_paths(&root, &encoded_paths)?;

        fs::write_file(&fs::resolve(&root, MIMETYPE_FILE), MIMETYPE.as_bytes())?;

        let manifest = build(
            document.width,
            document.height,
            flattened.entries,
            encoded_paths.into_iter().map(|p| p.entry).collect(),
        );
        let stack_path = fs::resolve(&root, STACK_XML);
        let mut writer = fs::create_file(&stack_path)?;
        write_stack_xml(&manifest, &mut writer)?;
        writer.flush().map_err(ExportError::fs(&stack_path))?;
        debug!("Wrote {}", stack_path.display());

        let archive = if self.config.zip {
            let archive_path = self
                .config
                .output_dir
                .join(format!("{}.{}", name, ARCHIVE_EXTENSION));
            archive::write_archive(&root, &archive_path)?;
            Some(archive_path)
        } else {
            None
        };

        info!(
            "Exported '{}': {} layer images, {} geometry tables",
            name, layer_images, geometry_tables
        );
        Ok(ExportReport {
            root,
            archive,
            manifest,
            layer_images,
            geometry_tables,
        })
    }

    fn write_layers(&self, root: &Path, flattened: &Flattened<'_>) -> Result<usize, ExportError> {
        fs::make_dirs(&fs::resolve(root, LAYER_DATA_DIR))?;
        for dir in &flattened.directories {
            fs::make_dirs(&fs::resolve(root, dir))?;
        }

        let options = self.config.layer_png_options();
        for task in flattened.file_tasks() {
            let target = fs::resolve(root, task.src);
            self.renderer.render_layer(task.node, &target, &options)?;
            debug!("Wrote {}", target.display());
        }
        Ok(flattened.tasks.len())
    }

    fn write_thumbnail(&self, root: &Path, document: &Document) -> Result<(), ExportError> {
        let dir = fs::resolve(root, THUMBNAIL_DIR);
        fs::make_dirs(&dir)?;
        let size = thumbnail_size(document.size());
        let target = dir.join(THUMBNAIL_FILE);
        self.renderer
            .render_thumbnail(document, size, &target, &PngOptions::default())?;
        debug!("Wrote {} ({}x{})", target.display(), size.width, size.height);
        Ok(())
    }
}

fn write_paths(root: &Path, encoded_paths: &[EncodedPath]) -> Result<usize, ExportError> {
    if encoded_paths.is_empty() {
        return Ok(0);
    }
    fs::make_dirs(&fs::resolve(root, PATHS_DIR))?;
    for encoded in encoded_paths {
        let target = fs::resolve(root, &encoded.entry.src);
        let mut writer = fs::create_file(&target)?;
        write_geometry_table(&encoded.rows, &mut writer)?;
        writer.flush().map_err(ExportError::fs(&target))?;
        debug!("Wrote {} ({} rows)", target.display(), encoded.rows.len());
    }
    Ok(encoded_paths.len())
}

/// Exports `document` with `renderer` in one call.
pub fn export_document<R: LayerRenderer + ?Sized>(
    document: &Document,
    renderer: &R,
    config: &ExportConfig,
) -> Result<ExportReport, ExportError> {
    OraExporter::new(renderer, config.clone()).export(document)
}
