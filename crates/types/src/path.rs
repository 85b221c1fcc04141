//! Vector paths and the rows they are encoded into.

use serde::{Deserialize, Serialize};

/// Scalars per Bezier point triplet: control-in, anchor and control-out,
/// each an (x, y) pair.
pub const TRIPLET_LEN: usize = 6;

/// One continuous segment of a vector path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Stroke {
    /// Flat triplet coordinates, `TRIPLET_LEN` scalars per point.
    pub points: Vec<f64>,
    #[serde(default)]
    pub closed: bool,
}

impl Stroke {
    pub fn open(points: Vec<f64>) -> Self {
        Self { points, closed: false }
    }

    pub fn closed(points: Vec<f64>) -> Self {
        Self { points, closed: true }
    }

    pub fn triplets(&self) -> std::slice::ChunksExact<'_, f64> {
        self.points.chunks_exact(TRIPLET_LEN)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VectorPath {
    pub name: String,
    #[serde(default)]
    pub strokes: Vec<Stroke>,
}

impl VectorPath {
    pub fn new(name: impl Into<String>, strokes: Vec<Stroke>) -> Self {
        Self {
            name: name.into(),
            strokes,
        }
    }
}

/// A single record of a geometry table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryRow {
    pub path: String,
    /// 1-based stroke index in order of appearance.
    pub stroke: usize,
    pub points: [f64; TRIPLET_LEN],
}
