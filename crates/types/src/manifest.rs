//! The export manifest written as `stack.xml`.

use crate::geometry::Offset;
use serde::{Deserialize, Serialize};

/// OpenRaster name of the source-over operator.
pub const COMPOSITE_OP_SRC_OVER: &str = "svg:src-over";
pub const VISIBILITY_VISIBLE: &str = "visible";
pub const DEFAULT_OPACITY: f64 = 1.0;

/// One exported layer image in the stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub name: String,
    /// Slash-separated path relative to the export root.
    pub src: String,
    pub x: i32,
    pub y: i32,
    pub composite_op: String,
    pub opacity: f64,
    pub visibility: String,
}

impl ManifestEntry {
    pub fn new(name: impl Into<String>, src: impl Into<String>, offset: Offset) -> Self {
        Self {
            name: name.into(),
            src: src.into(),
            x: offset.x,
            y: offset.y,
            composite_op: COMPOSITE_OP_SRC_OVER.to_string(),
            opacity: DEFAULT_OPACITY,
            visibility: VISIBILITY_VISIBLE.to_string(),
        }
    }

    pub fn offset(&self) -> Offset {
        Offset::new(self.x, self.y)
    }
}

/// One vector path and its geometry table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEntry {
    pub name: String,
    pub src: String,
}

impl PathEntry {
    pub fn new(name: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            src: src.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExportManifest {
    pub width: u32,
    pub height: u32,
    /// Entries in flattening order, topmost first.
    pub stack: Vec<ManifestEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<PathEntry>,
}

impl ExportManifest {
    pub fn has_paths(&self) -> bool {
        !self.paths.is_empty()
    }
}
