//! Export parameters, as the host presents them to the user.

use crate::error::ExportError;
use ora_traits::{CompressionLevel, PngOptions};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Existing directory the `<name>/` export root (and `<name>.ora`) go into.
    pub output_dir: PathBuf,
    pub compression: CompressionLevel,
    /// Export each group as one merged image instead of a directory.
    pub merge_groups: bool,
    /// Also package the export root as `<name>.ora`.
    pub zip: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            compression: CompressionLevel::default(),
            merge_groups: true,
            zip: false,
        }
    }
}

impl ExportConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Sets the PNG compression level; fails outside 0..=9.
    pub fn with_compression(mut self, level: u8) -> Result<Self, ExportError> {
        self.compression = CompressionLevel::new(level)?;
        Ok(self)
    }

    pub fn with_merge_groups(mut self, merge_groups: bool) -> Self {
        self.merge_groups = merge_groups;
        self
    }

    pub fn with_zip(mut self, zip: bool) -> Self {
        self.zip = zip;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn layer_png_options(&self) -> PngOptions {
        PngOptions::with_compression(self.compression)
    }

    /// The output directory must already exist.
    pub fn validate(&self) -> Result<(), ExportError> {
        if !self.output_dir.is_dir() {
            return Err(ExportError::Config(format!(
                "Output directory '{}' does not exist or is not a directory",
                self.output_dir.display()
            )));
        }
        Ok(())
    }
}
