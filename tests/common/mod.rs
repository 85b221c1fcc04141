pub mod fixtures;

use ora_love::{ExportConfig, ExportReport, OraExporter, RasterHost};
use ora_love::types::Document;
use std::path::Path;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Export with the given flags into `output_dir`.
pub fn export(
    document: &Document,
    host: &RasterHost,
    output_dir: &Path,
    merge_groups: bool,
    zip: bool,
) -> Result<ExportReport, ora_love::ExportError> {
    init_logging();
    let config = ExportConfig::new(output_dir)
        .with_merge_groups(merge_groups)
        .with_zip(zip);
    OraExporter::new(host, config).export(document)
}

/// All files under `root`, as sorted slash-separated relative paths.
pub fn list_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect();
    files.sort();
    files
}
