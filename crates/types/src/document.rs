use crate::geometry::Size;
use crate::layer::LayerNode;
use crate::path::VectorPath;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name used when the host document has never been saved.
pub const UNTITLED: &str = "untitled";

/// A read-only snapshot of the host document taken for one export.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub filename: Option<PathBuf>,
    #[serde(default)]
    pub layers: Vec<LayerNode>,
    #[serde(default)]
    pub paths: Vec<VectorPath>,
}

impl Document {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The output name: the stem of the host filename, e.g. `hero` for
    /// `/art/hero.xcf`.
    pub fn name(&self) -> String {
        self.filename
            .as_deref()
            .and_then(|p| p.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string())
    }
}
