use ora_types::{ExportManifest, ManifestEntry, PathEntry};

/// Assembles the export manifest. Entries keep the order they were produced
/// in; nothing is validated or reordered here.
pub fn build(
    width: u32,
    height: u32,
    stack: Vec<ManifestEntry>,
    paths: Vec<PathEntry>,
) -> ExportManifest {
    ExportManifest {
        width,
        height,
        stack,
        paths,
    }
}
